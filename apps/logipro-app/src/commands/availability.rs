//! # Carrier Availability Commands
//!
//! Posts announcing that a carrier is free from a date and place.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use logipro_core::validation::validate_carrier_availability;
use logipro_core::{Carrier, CarrierAvailability};

use super::{delete_one, get_one, insert_one, list_all, optional_text, search_all, update_one};
use crate::error::ApiError;
use crate::state::{DbState, SessionState};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityInput {
    /// Links the post to a saved carrier; name and phone are then taken from
    /// that record when left blank.
    #[serde(default)]
    pub carrier_id: Option<String>,
    #[serde(default)]
    pub carrier_name: String,
    #[serde(default)]
    pub phone: String,
    pub current_location: String,
    #[serde(default)]
    pub destination_preference: String,
    pub available_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

async fn build(
    db: &DbState,
    session: &SessionState,
    input: AvailabilityInput,
) -> Result<CarrierAvailability, ApiError> {
    let carrier_id = optional_text(input.carrier_id);
    let mut carrier_name = input.carrier_name.trim().to_string();
    let mut phone = input.phone.trim().to_string();

    if let Some(id) = &carrier_id {
        let carrier: Carrier = get_one(db, session, id).await?;
        if carrier_name.is_empty() {
            carrier_name = carrier.name;
        }
        if phone.is_empty() {
            phone = carrier.phone;
        }
    }

    Ok(CarrierAvailability {
        id: String::new(),
        carrier_id,
        carrier_name,
        phone,
        current_location: input.current_location.trim().to_string(),
        destination_preference: input.destination_preference.trim().to_string(),
        available_date: input.available_date,
        notes: optional_text(input.notes),
        created_at: Utc::now(),
    })
}

pub async fn create_availability(
    db: &DbState,
    session: &SessionState,
    input: AvailabilityInput,
) -> Result<CarrierAvailability, ApiError> {
    let post = build(db, session, input).await?;
    validate_carrier_availability(&post)?;
    insert_one(db, session, post).await
}

pub async fn update_availability(
    db: &DbState,
    session: &SessionState,
    id: &str,
    input: AvailabilityInput,
) -> Result<CarrierAvailability, ApiError> {
    let existing: CarrierAvailability = get_one(db, session, id).await?;

    let mut post = build(db, session, input).await?;
    post.id = existing.id;
    post.created_at = existing.created_at;

    validate_carrier_availability(&post)?;
    update_one(db, session, post).await
}

pub async fn list_availabilities(
    db: &DbState,
    session: &SessionState,
) -> Result<Vec<CarrierAvailability>, ApiError> {
    list_all(db, session).await
}

/// Matches carrier name, current location or preferred destination.
pub async fn search_availabilities(
    db: &DbState,
    session: &SessionState,
    query: &str,
) -> Result<Vec<CarrierAvailability>, ApiError> {
    search_all(db, session, query).await
}

pub async fn delete_availability(
    db: &DbState,
    session: &SessionState,
    id: &str,
) -> Result<bool, ApiError> {
    delete_one::<CarrierAvailability>(db, session, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::carrier::{create_carrier, CarrierInput};
    use crate::commands::test_support::setup;
    use crate::error::ErrorCode;

    fn input(name: &str, from: &str, to: &str) -> AvailabilityInput {
        AvailabilityInput {
            carrier_id: None,
            carrier_name: name.to_string(),
            phone: "5321234567".to_string(),
            current_location: from.to_string(),
            destination_preference: to.to_string(),
            available_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_search() {
        let (db, session) = setup().await;
        create_availability(&db, &session, input("Ali", "Mersin", "Ankara")).await.unwrap();
        create_availability(&db, &session, input("Veli", "Bursa", "İzmir")).await.unwrap();

        let hits = search_availabilities(&db, &session, "mersin").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].carrier_name, "Ali");

        let by_destination = search_availabilities(&db, &session, "ankara").await.unwrap();
        assert_eq!(by_destination[0].carrier_name, "Ali");
    }

    #[tokio::test]
    async fn test_linked_carrier_fills_name_and_phone() {
        let (db, session) = setup().await;
        let carrier = create_carrier(
            &db,
            &session,
            CarrierInput {
                name: "Hasan Çelik".into(),
                phone: "5441234567".into(),
                plate: "06 KLM 42".into(),
                ..CarrierInput::default()
            },
        )
        .await
        .unwrap();

        let mut post = input("", "Adana", "");
        post.carrier_id = Some(carrier.id.clone());
        post.phone = String::new();

        let saved = create_availability(&db, &session, post).await.unwrap();
        assert_eq!(saved.carrier_name, "Hasan Çelik");
        assert_eq!(saved.phone, "5441234567");
    }

    #[tokio::test]
    async fn test_unknown_carrier_is_not_found() {
        let (db, session) = setup().await;
        let mut post = input("Ali", "Adana", "");
        post.carrier_id = Some("ghost".into());

        let err = create_availability(&db, &session, post).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (db, session) = setup().await;
        let saved = create_availability(&db, &session, input("Ali", "Mersin", "")).await.unwrap();

        let updated = update_availability(&db, &session, &saved.id, input("Ali", "Konya", "Samsun"))
            .await
            .unwrap();
        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.created_at, saved.created_at);
        assert_eq!(list_availabilities(&db, &session).await.unwrap()[0].current_location, "Konya");

        assert!(delete_availability(&db, &session, &saved.id).await.unwrap());
        assert!(list_availabilities(&db, &session).await.unwrap().is_empty());
    }
}
