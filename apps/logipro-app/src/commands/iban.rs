//! # IBAN Commands
//!
//! Bank accounts commissions are paid to. Numbers are stored normalized
//! (no spaces, uppercase) and validated with the TR mod-97 check.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use logipro_core::validation::{normalize_iban, validate_iban_record};
use logipro_core::Iban;

use super::{delete_one, get_one, insert_one, list_all, update_one};
use crate::error::ApiError;
use crate::state::{DbState, SessionState};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IbanInput {
    pub name_surname: String,
    pub iban_number: String,
}

pub async fn create_iban(
    db: &DbState,
    session: &SessionState,
    input: IbanInput,
) -> Result<Iban, ApiError> {
    let iban = Iban {
        id: String::new(),
        name_surname: input.name_surname.trim().to_string(),
        iban_number: normalize_iban(&input.iban_number),
        created_at: Utc::now(),
    };
    validate_iban_record(&iban)?;
    insert_one(db, session, iban).await
}

pub async fn update_iban(
    db: &DbState,
    session: &SessionState,
    id: &str,
    input: IbanInput,
) -> Result<Iban, ApiError> {
    let existing: Iban = get_one(db, session, id).await?;
    let iban = Iban {
        name_surname: input.name_surname.trim().to_string(),
        iban_number: normalize_iban(&input.iban_number),
        ..existing
    };
    validate_iban_record(&iban)?;
    update_one(db, session, iban).await
}

pub async fn list_ibans(db: &DbState, session: &SessionState) -> Result<Vec<Iban>, ApiError> {
    list_all(db, session).await
}

pub async fn delete_iban(db: &DbState, session: &SessionState, id: &str) -> Result<bool, ApiError> {
    delete_one::<Iban>(db, session, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::setup;
    use logipro_core::ValidationError;

    fn input(number: &str) -> IbanInput {
        IbanInput {
            name_surname: "Ali Veli".to_string(),
            iban_number: number.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_stores_normalized() {
        let (db, session) = setup().await;

        let iban = create_iban(&db, &session, input("tr33 0006 1005 1978 6457 8413 26"))
            .await
            .unwrap();
        assert_eq!(iban.iban_number, "TR330006100519786457841326");
        assert_eq!(iban.formatted(), "TR33 0006 1005 1978 6457 8413 26");
        assert_eq!(list_ibans(&db, &session).await.unwrap(), vec![iban]);
    }

    #[tokio::test]
    async fn test_each_stage_has_its_own_message() {
        let (db, session) = setup().await;

        let cases = [
            ("DE330006100519786457841326", ValidationError::IbanMissingPrefix),
            ("TR3300061005", ValidationError::IbanWrongLength { actual: 12 }),
            ("TR33000610051978645784132X", ValidationError::IbanNonDigit),
            ("TR000000000000000000000000", ValidationError::IbanChecksum),
        ];

        for (number, expected) in cases {
            let err = create_iban(&db, &session, input(number)).await.unwrap_err();
            assert_eq!(err.message, expected.to_string(), "{}", number);
        }
        assert!(list_ibans(&db, &session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (db, session) = setup().await;
        let iban = create_iban(&db, &session, input("TR330006100519786457841326"))
            .await
            .unwrap();

        let updated = update_iban(
            &db,
            &session,
            &iban.id,
            IbanInput {
                name_surname: "Ayşe Yılmaz".into(),
                iban_number: iban.iban_number.clone(),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.created_at, iban.created_at);
        assert_eq!(updated.name_surname, "Ayşe Yılmaz");

        assert!(delete_iban(&db, &session, &iban.id).await.unwrap());
    }
}
