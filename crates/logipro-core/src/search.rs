//! # Search Module
//!
//! In-memory filters behind every list screen's search box.
//!
//! ## Matching Rules
//! ```text
//! query "  ANKARA "  ──► trim + lowercase ──► "ankara"
//!
//! for each item, in list order:
//!     any search field, lowercased, contains "ankara"?  ──► keep
//!
//! empty query ──► every item, same order
//! ```
//!
//! Lowercasing is Unicode's default, not Turkish-specific: `İ` becomes
//! `i̇` (i + U+0307), so the query `izmir` does not find `İzmir`, while
//! `İzmir` and `zmir` do.
//!
//! Filters borrow from the input and never reorder it, so the result is
//! always a subsequence of the list. They hold no state and can run on every
//! keystroke or behind the debouncer in `logipro-app`.

use crate::types::{Carrier, CarrierAvailability, CompletedJob, Company, PlannedJob};

// =============================================================================
// Searchable Trait
// =============================================================================

/// A record that can be matched against a search box query.
pub trait Searchable {
    /// The text fields tested for a substring match.
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for Carrier {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.phone.as_str(), self.plate.as_str()]
    }
}

impl Searchable for Company {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.phone.as_str(), self.contact_person.as_str()]
    }
}

impl Searchable for PlannedJob {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.loading_location.as_str(),
            self.delivery_location.as_str(),
            self.cargo_type.as_str(),
        ]
    }
}

impl Searchable for CompletedJob {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.loading_location.as_str(),
            self.delivery_location.as_str(),
            self.cargo_type.as_str(),
        ]
    }
}

impl Searchable for CarrierAvailability {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.carrier_name.as_str(),
            self.current_location.as_str(),
            self.destination_preference.as_str(),
        ]
    }
}

// =============================================================================
// Filters
// =============================================================================

/// Keeps the items where any search field contains `query`, ignoring case.
///
/// ## Example
/// ```rust
/// use logipro_core::search::{filter_by_query, Searchable};
///
/// struct City(&'static str);
/// impl Searchable for City {
///     fn search_fields(&self) -> Vec<&str> {
///         vec![self.0]
///     }
/// }
///
/// let cities = [City("İstanbul"), City("Ankara"), City("Antalya")];
/// let hits = filter_by_query(&cities, " AN ");
/// assert_eq!(hits.len(), 3);
///
/// let hits = filter_by_query(&cities, "kara");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].0, "Ankara");
/// ```
pub fn filter_by_query<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();

    if needle.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|item| {
            item.search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Filters carriers by name, phone or plate.
pub fn search_carriers<'a>(carriers: &'a [Carrier], query: &str) -> Vec<&'a Carrier> {
    filter_by_query(carriers, query)
}

/// Filters companies by name, phone or contact person.
pub fn search_companies<'a>(companies: &'a [Company], query: &str) -> Vec<&'a Company> {
    filter_by_query(companies, query)
}

/// Filters planned jobs by loading location, delivery location or cargo type.
pub fn search_jobs<'a>(jobs: &'a [PlannedJob], query: &str) -> Vec<&'a PlannedJob> {
    filter_by_query(jobs, query)
}

/// Filters completed jobs by loading location, delivery location or cargo type.
pub fn search_completed_jobs<'a>(jobs: &'a [CompletedJob], query: &str) -> Vec<&'a CompletedJob> {
    filter_by_query(jobs, query)
}

/// Filters availability posts by carrier name, current location or
/// destination preference.
pub fn search_carrier_availabilities<'a>(
    availabilities: &'a [CarrierAvailability],
    query: &str,
) -> Vec<&'a CarrierAvailability> {
    filter_by_query(availabilities, query)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VehicleType;
    use chrono::{NaiveDate, Utc};

    fn carrier(name: &str, phone: &str, plate: &str) -> Carrier {
        let now = Utc::now();
        Carrier {
            id: name.to_lowercase(),
            name: name.to_string(),
            phone: phone.to_string(),
            national_id: None,
            plate: plate.to_string(),
            dorse_plate: None,
            vehicle_type: VehicleType::Tir,
            created_at: now,
            updated_at: now,
        }
    }

    fn company(name: &str, contact: &str) -> Company {
        let now = Utc::now();
        Company {
            id: name.to_lowercase(),
            name: name.to_string(),
            phone: "2121234567".to_string(),
            address: "Merkez".to_string(),
            contact_person: contact.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn job(from: &str, to: &str, cargo: &str) -> PlannedJob {
        let now = Utc::now();
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        PlannedJob {
            id: format!("{from}-{to}"),
            company_id: "co1".to_string(),
            cargo_type: cargo.to_string(),
            tonnage: "20".to_string(),
            dimensions: None,
            loading_location: from.to_string(),
            delivery_location: to.to_string(),
            loading_date: day,
            delivery_date: day,
            transportation_cost: "10000".to_string(),
            commission_cost: "1000".to_string(),
            notes: Some("bursa üzerinden".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_empty_query_is_identity() {
        let carriers = vec![
            carrier("Mehmet", "5321234567", "34 ABC 123"),
            carrier("Ayşe", "5441234567", "06 XYZ 99"),
        ];

        for query in ["", "   ", "\t"] {
            let hits = search_carriers(&carriers, query);
            assert_eq!(hits.len(), carriers.len());
            for (hit, original) in hits.iter().zip(&carriers) {
                assert!(std::ptr::eq(*hit, original));
            }
        }
    }

    #[test]
    fn test_carrier_fields() {
        let carriers = vec![
            carrier("Mehmet", "5321234567", "34 ABC 123"),
            carrier("Ayşe", "5441234567", "06 XYZ 99"),
        ];

        assert_eq!(search_carriers(&carriers, "abc").len(), 1);
        assert_eq!(search_carriers(&carriers, "544")[0].name, "Ayşe");
        assert_eq!(search_carriers(&carriers, "MEHM")[0].name, "Mehmet");
        assert!(search_carriers(&carriers, "ankara").is_empty());
    }

    #[test]
    fn test_results_are_a_subsequence() {
        let companies = vec![
            company("Demir Nakliyat", "Ali"),
            company("Kaya Lojistik", "Veli"),
            company("Deniz Gıda", "Alper"),
            company("Yıldız Tekstil", "Zeynep"),
        ];

        let hits = search_companies(&companies, "al");
        let names: Vec<_> = hits.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Demir Nakliyat", "Deniz Gıda"]);

        let mut last = None;
        for hit in hits {
            let pos = companies.iter().position(|c| std::ptr::eq(c, hit)).unwrap();
            assert!(last.map_or(true, |l| pos > l));
            last = Some(pos);
        }
    }

    #[test]
    fn test_jobs_match_route_and_cargo_only() {
        let jobs = vec![
            job("İzmir", "Ankara", "Demir"),
            job("Mersin", "Kayseri", "Narenciye"),
        ];

        assert_eq!(search_jobs(&jobs, "kayseri").len(), 1);
        assert_eq!(search_jobs(&jobs, "demir")[0].delivery_location, "Ankara");
        // Notes are not a search field.
        assert!(search_jobs(&jobs, "bursa").is_empty());
    }

    #[test]
    fn test_completed_and_availability_fields() {
        let completed = vec![CompletedJob::from_planned(
            &job("Konya", "Adana", "Un"),
            "car1",
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            Utc::now(),
        )];
        assert_eq!(search_completed_jobs(&completed, "ADANA").len(), 1);

        let availabilities = vec![CarrierAvailability {
            id: "a1".to_string(),
            carrier_id: None,
            carrier_name: "Hasan".to_string(),
            phone: "5321234567".to_string(),
            current_location: "Samsun".to_string(),
            destination_preference: "Batı".to_string(),
            available_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            notes: None,
            created_at: Utc::now(),
        }];
        assert_eq!(search_carrier_availabilities(&availabilities, "bat").len(), 1);
        assert_eq!(search_carrier_availabilities(&availabilities, "sams").len(), 1);
        assert!(search_carrier_availabilities(&availabilities, "5321").is_empty());
    }

    #[test]
    fn test_dotted_capital_i_is_not_folded_to_ascii() {
        let jobs = vec![job("İzmir", "Ankara", "Pamuk")];

        assert_eq!("İ".to_lowercase(), "i\u{307}");
        assert!(search_jobs(&jobs, "izmir").is_empty());
        assert_eq!(search_jobs(&jobs, "İzmir").len(), 1);
        assert_eq!(search_jobs(&jobs, "zmir").len(), 1);
    }
}
