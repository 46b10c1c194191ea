//! # Carrier Commands
//!
//! Drivers and their vehicles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use logipro_core::validation::validate_carrier;
use logipro_core::{Carrier, VehicleType};

use super::{delete_one, get_one, insert_one, list_all, optional_text, search_all, update_one};
use crate::error::ApiError;
use crate::state::{DbState, SessionState};

/// Carrier form contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierInput {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub national_id: Option<String>,
    pub plate: String,
    #[serde(default)]
    pub dorse_plate: Option<String>,
    #[serde(default)]
    pub vehicle_type: VehicleType,
}

impl CarrierInput {
    fn into_carrier(self, id: String, created_at: DateTime<Utc>) -> Carrier {
        Carrier {
            id,
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            national_id: optional_text(self.national_id),
            plate: self.plate.trim().to_uppercase(),
            dorse_plate: optional_text(self.dorse_plate).map(|p| p.to_uppercase()),
            vehicle_type: self.vehicle_type,
            created_at,
            updated_at: Utc::now(),
        }
    }
}

pub async fn create_carrier(
    db: &DbState,
    session: &SessionState,
    input: CarrierInput,
) -> Result<Carrier, ApiError> {
    let carrier = input.into_carrier(String::new(), Utc::now());
    validate_carrier(&carrier)?;
    insert_one(db, session, carrier).await
}

pub async fn update_carrier(
    db: &DbState,
    session: &SessionState,
    id: &str,
    input: CarrierInput,
) -> Result<Carrier, ApiError> {
    let existing: Carrier = get_one(db, session, id).await?;
    let carrier = input.into_carrier(existing.id, existing.created_at);
    validate_carrier(&carrier)?;
    update_one(db, session, carrier).await
}

pub async fn get_carrier(
    db: &DbState,
    session: &SessionState,
    id: &str,
) -> Result<Carrier, ApiError> {
    get_one(db, session, id).await
}

pub async fn list_carriers(db: &DbState, session: &SessionState) -> Result<Vec<Carrier>, ApiError> {
    list_all(db, session).await
}

/// Matches name, phone or plate.
pub async fn search_carriers(
    db: &DbState,
    session: &SessionState,
    query: &str,
) -> Result<Vec<Carrier>, ApiError> {
    search_all(db, session, query).await
}

pub async fn delete_carrier(
    db: &DbState,
    session: &SessionState,
    id: &str,
) -> Result<bool, ApiError> {
    delete_one::<Carrier>(db, session, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{session_for, setup};
    use crate::error::ErrorCode;
    use crate::state::DeleteState;

    fn input(name: &str, phone: &str) -> CarrierInput {
        CarrierInput {
            name: name.to_string(),
            phone: phone.to_string(),
            national_id: Some("10000000146".to_string()),
            plate: "34 abc 123".to_string(),
            dorse_plate: Some("  ".to_string()),
            vehicle_type: VehicleType::Tir,
        }
    }

    #[tokio::test]
    async fn test_create_normalizes_and_persists() {
        let (db, session) = setup().await;

        let carrier = create_carrier(&db, &session, input(" Ahmet Kaya ", "532 123 45 67"))
            .await
            .unwrap();

        assert!(!carrier.id.is_empty());
        assert_eq!(carrier.name, "Ahmet Kaya");
        assert_eq!(carrier.plate, "34 ABC 123");
        assert_eq!(carrier.dorse_plate, None);
        assert_eq!(list_carriers(&db, &session).await.unwrap(), vec![carrier]);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_phone() {
        let (db, session) = setup().await;

        let err = create_carrier(&db, &session, input("Ahmet", "0532 123 45 67"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(list_carriers(&db, &session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_bad_national_id() {
        let (db, session) = setup().await;
        let mut bad = input("Ahmet", "5321234567");
        bad.national_id = Some("10000000147".to_string());

        let err = create_carrier(&db, &session, bad).await.unwrap_err();
        assert_eq!(err.message, "Geçersiz TC Kimlik numarası");
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_created_at() {
        let (db, session) = setup().await;
        let created = create_carrier(&db, &session, input("Ahmet", "5321234567"))
            .await
            .unwrap();

        let updated = update_carrier(&db, &session, &created.id, input("Ahmet Kaya", "5441234567"))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(get_carrier(&db, &session, &created.id).await.unwrap().phone, "5441234567");

        let err = update_carrier(&db, &session, "missing", input("X", "5321234567"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_search_and_user_scoping() {
        let (db, session) = setup().await;
        create_carrier(&db, &session, input("Ahmet Kaya", "5321234567")).await.unwrap();
        create_carrier(&db, &session, input("Mehmet Demir", "5441234567")).await.unwrap();

        let hits = search_carriers(&db, &session, "kaya").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Ahmet Kaya");

        let by_phone = search_carriers(&db, &session, "544").await.unwrap();
        assert_eq!(by_phone[0].name, "Mehmet Demir");

        let other = session_for("u2");
        assert!(list_carriers(&db, &other).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_through_confirmation() {
        let (db, session) = setup().await;
        let carrier = create_carrier(&db, &session, input("Ahmet", "5321234567"))
            .await
            .unwrap();

        let confirm = DeleteState::new();
        confirm.open(carrier, "carrier");

        let deleted = confirm
            .confirm_delete("carrier", |c: Carrier| {
                let (db, session) = (db.clone(), session.clone());
                async move { delete_carrier(&db, &session, &c.id).await }
            })
            .await;

        assert!(deleted);
        assert!(!confirm.is_open());
        assert!(list_carriers(&db, &session).await.unwrap().is_empty());
    }
}
