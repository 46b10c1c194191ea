//! # Commands Module
//!
//! Everything the screens call.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs           ◄─── You are here (shared helpers)
//! ├── auth.rs          ◄─── Sign-up, approval, sign-in, password change
//! ├── carrier.rs       ◄─── Carriers
//! ├── company.rs       ◄─── Client companies
//! ├── job.rs           ◄─── Planned/completed jobs, commissions
//! ├── availability.rs  ◄─── Carrier availability posts
//! └── iban.rs          ◄─── Payment bank accounts
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  create_carrier(&db, &session, CarrierInput { .. })                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  session.user_id()?          ◄── UNAUTHORIZED if nobody is signed in    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  validate_carrier(&carrier)? ◄── VALIDATION_ERROR with field message    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  db.collection::<Carrier>(uid).insert(carrier).await?                  │
//! │         │                    ◄── DATABASE_ERROR, generic message        │
//! │         ▼                                                               │
//! │  Ok(Carrier)                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Database + signed-in user
//! async fn list_carriers(db: &DbState, session: &SessionState)
//!
//! // Needs config for the past-date rule
//! async fn create_planned_job(db: &DbState, session: &SessionState, config: &AppConfig, ..)
//!
//! // Accounts only
//! async fn sign_up(db: &DbState, input: SignUpInput)
//! ```
//!
//! Delete commands return `Ok(false)` when the record was already gone, so
//! they plug straight into [`DeleteState::confirm_delete`](crate::state::DeleteState::confirm_delete).

pub mod auth;
pub mod availability;
pub mod carrier;
pub mod company;
pub mod iban;
pub mod job;

use tracing::{debug, info};

use logipro_core::search::{filter_by_query, Searchable};
use logipro_core::Document;

use crate::error::ApiError;
use crate::state::{DbState, SessionState};

/// Lists a whole collection of the signed-in user.
pub(crate) async fn list_all<T: Document>(
    db: &DbState,
    session: &SessionState,
) -> Result<Vec<T>, ApiError> {
    let uid = session.user_id()?;
    let items = db.collection::<T>(uid).list().await?;
    debug!(collection = T::COLLECTION, count = items.len(), "Listed");
    Ok(items)
}

/// Lists, then filters with the collection's search fields.
pub(crate) async fn search_all<T>(
    db: &DbState,
    session: &SessionState,
    query: &str,
) -> Result<Vec<T>, ApiError>
where
    T: Document + Searchable + Clone,
{
    let items = list_all::<T>(db, session).await?;
    Ok(filter_by_query(&items, query).into_iter().cloned().collect())
}

/// Loads one record or fails with `NOT_FOUND`.
pub(crate) async fn get_one<T: Document>(
    db: &DbState,
    session: &SessionState,
    id: &str,
) -> Result<T, ApiError> {
    let uid = session.user_id()?;
    db.collection::<T>(uid)
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found(T::COLLECTION, id))
}

pub(crate) async fn insert_one<T: Document>(
    db: &DbState,
    session: &SessionState,
    item: T,
) -> Result<T, ApiError> {
    let uid = session.user_id()?;
    let saved = db.collection::<T>(uid).insert(item).await?;
    info!(collection = T::COLLECTION, id = %saved.id(), "Created");
    Ok(saved)
}

pub(crate) async fn update_one<T: Document>(
    db: &DbState,
    session: &SessionState,
    item: T,
) -> Result<T, ApiError> {
    let uid = session.user_id()?;
    db.collection::<T>(uid).update(&item).await?;
    info!(collection = T::COLLECTION, id = %item.id(), "Updated");
    Ok(item)
}

/// Deletes one record. `Ok(false)` if it did not exist.
pub(crate) async fn delete_one<T: Document>(
    db: &DbState,
    session: &SessionState,
    id: &str,
) -> Result<bool, ApiError> {
    let uid = session.user_id()?;
    let deleted = db.collection::<T>(uid).delete(id).await?;
    info!(collection = T::COLLECTION, %id, deleted, "Delete requested");
    Ok(deleted)
}

/// Trims an optional text field; blank becomes `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// Test Support
// =============================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;
    use logipro_store::{Database, DbConfig, User};

    use crate::state::{DbState, SessionState};

    pub async fn db() -> DbState {
        DbState::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    pub fn session_for(user_id: &str) -> SessionState {
        let session = SessionState::new();
        session.sign_in(User {
            id: user_id.to_string(),
            email: format!("{}@example.com", user_id),
            approved: true,
            is_admin: false,
            created_at: Utc::now(),
            approved_at: Some(Utc::now()),
        });
        session
    }

    /// In-memory database plus a signed-in session for `u1`.
    pub async fn setup() -> (DbState, SessionState) {
        (db().await, session_for("u1"))
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::error::ErrorCode;
    use logipro_core::Company;

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(None), None);
        assert_eq!(optional_text(Some("   ".into())), None);
        assert_eq!(optional_text(Some(" 06 DR 1 ".into())), Some("06 DR 1".into()));
    }

    #[tokio::test]
    async fn test_commands_require_sign_in() {
        let db = db().await;
        let session = SessionState::new();

        let err = list_all::<Company>(&db, &session).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (db, session) = setup().await;

        let err = get_one::<Company>(&db, &session, "nope").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
