//! # Store Error Types
//!
//! ```text
//!  sqlx::Error ─────────┐
//!  MigrateError ────────┤
//!  serde_json::Error ───┼──► DbError ──► ApiError (logipro-app)
//!  argon2 / join error ─┘                 NOT_FOUND / ALREADY_EXISTS keep
//!                                         their detail, everything else
//!                                         becomes the generic message
//! ```

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// `entity` is a collection name or `"user"`; `id` the document id or
    /// full document path.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Only raised for account e-mails.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// A path segment is empty or contains `/`.
    #[error("Invalid document path: {0}")]
    InvalidPath(String),

    /// A stored payload does not match the record type, or a patch targets
    /// a payload that is not a JSON object.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("row", "unknown"),
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();
                // SQLite reports "UNIQUE constraint failed: users.email"
                match msg.strip_prefix("UNIQUE constraint failed: ") {
                    Some(column) => DbError::duplicate(column, "unknown"),
                    None => DbError::QueryFailed(msg.to_string()),
                }
            }
            sqlx::Error::PoolTimedOut => {
                DbError::ConnectionFailed("timed out waiting for a connection".to_string())
            }
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("store is closed".to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        DbError::Serialization(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;
