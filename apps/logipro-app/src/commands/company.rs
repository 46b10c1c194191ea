//! # Company Commands

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use logipro_core::validation::validate_company;
use logipro_core::Company;

use super::{delete_one, get_one, insert_one, list_all, search_all, update_one};
use crate::error::ApiError;
use crate::state::{DbState, SessionState};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInput {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact_person: String,
}

impl CompanyInput {
    fn into_company(self, id: String, created_at: DateTime<Utc>) -> Company {
        Company {
            id,
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            contact_person: self.contact_person.trim().to_string(),
            created_at,
            updated_at: Utc::now(),
        }
    }
}

pub async fn create_company(
    db: &DbState,
    session: &SessionState,
    input: CompanyInput,
) -> Result<Company, ApiError> {
    let company = input.into_company(String::new(), Utc::now());
    validate_company(&company)?;
    insert_one(db, session, company).await
}

pub async fn update_company(
    db: &DbState,
    session: &SessionState,
    id: &str,
    input: CompanyInput,
) -> Result<Company, ApiError> {
    let existing: Company = get_one(db, session, id).await?;
    let company = input.into_company(existing.id, existing.created_at);
    validate_company(&company)?;
    update_one(db, session, company).await
}

pub async fn get_company(
    db: &DbState,
    session: &SessionState,
    id: &str,
) -> Result<Company, ApiError> {
    get_one(db, session, id).await
}

pub async fn list_companies(db: &DbState, session: &SessionState) -> Result<Vec<Company>, ApiError> {
    list_all(db, session).await
}

/// Matches name, phone or contact person.
pub async fn search_companies(
    db: &DbState,
    session: &SessionState,
    query: &str,
) -> Result<Vec<Company>, ApiError> {
    search_all(db, session, query).await
}

pub async fn delete_company(
    db: &DbState,
    session: &SessionState,
    id: &str,
) -> Result<bool, ApiError> {
    delete_one::<Company>(db, session, id).await
}
