//! # API Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in LogisticsPRO                           │
//! │                                                                         │
//! │  Screen                      Rust Backend                               │
//! │  ──────                      ────────────                               │
//! │                                                                         │
//! │  create_carrier(input)                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation Error? ─── field message kept verbatim ──┐          │  │
//! │  │         │                                            │          │  │
//! │  │         ▼                                            ▼          │  │
//! │  │  Store Error? ──── logged, generic message ────── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "VALIDATION_ERROR",                                          │
//! │    "message": "Geçersiz IBAN numarası" }                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Store failures never reach the user verbatim; the detail goes to the log
//! and the screen shows [`GENERIC_FAILURE_MESSAGE`].

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use logipro_core::{CoreError, ValidationError};
use logipro_store::DbError;

/// Shown for any failure in the storage layer.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "İşlem sırasında bir hata oluştu. Lütfen tekrar deneyin.";

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Kayıt bulunamadı"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Record not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// A unique value is already taken (e.g. e-mail)
    AlreadyExists,

    /// Storage operation failed
    DatabaseError,

    /// No user is signed in, or credentials were rejected
    Unauthorized,

    /// Account exists but has not been approved yet
    NotApproved,

    /// Caller lacks the admin role
    Forbidden,

    /// Stored data is inconsistent (e.g. unreadable amount)
    BusinessLogic,

    /// Configuration could not be loaded
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("Kayıt bulunamadı ({}: {})", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts store errors to API errors.
///
/// Only "not found" and "already exists" carry meaning for the user; every
/// other failure is logged and replaced by the generic message.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::AlreadyExists,
                format!("{} '{}' zaten kayıtlı", field, value),
            ),
            other => {
                tracing::error!(error = %other, "Storage operation failed");
                ApiError::new(ErrorCode::DatabaseError, GENERIC_FAILURE_MESSAGE)
            }
        }
    }
}

/// Field messages pass through unchanged.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ApiError::from(e),
            CoreError::InvalidAmount { .. } | CoreError::AmountOverflow => {
                tracing::warn!(error = %err, "Stored amounts could not be totalled");
                ApiError::new(ErrorCode::BusinessLogic, err.to_string())
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        tracing::error!(error = %err, "Configuration error");
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors raised while loading or saving `logipro.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine the application data directory")]
    NoDataDir,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::not_found("carriers", "c1");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert!(json["message"].as_str().unwrap().contains("c1"));
    }

    #[test]
    fn test_validation_message_is_kept() {
        let err = ApiError::from(ValidationError::IbanChecksum);
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Geçersiz IBAN numarası");
    }

    #[test]
    fn test_store_failures_are_generic() {
        let err = ApiError::from(DbError::QueryFailed("disk I/O error".into()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, GENERIC_FAILURE_MESSAGE);

        let err = ApiError::from(DbError::ConnectionFailed("pool closed".into()));
        assert_eq!(err.message, GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_duplicate_maps_to_already_exists() {
        let err = ApiError::from(DbError::duplicate("email", "a@b.com"));
        assert_eq!(err.code, ErrorCode::AlreadyExists);
        assert!(err.message.contains("a@b.com"));
    }

    #[test]
    fn test_core_validation_unwraps() {
        let err = ApiError::from(CoreError::Validation(ValidationError::InvalidPhone));
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
