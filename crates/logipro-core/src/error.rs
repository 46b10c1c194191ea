//! # Error Types
//!
//! Domain-specific error types for logipro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  logipro-core errors (this file)                                       │
//! │  ├── ValidationError  - Field-level input failures (localized)         │
//! │  └── CoreError        - Domain failures (bad stored amounts, ...)      │
//! │                                                                         │
//! │  logipro-store errors (separate crate)                                 │
//! │  └── DbError          - Document store failures                        │
//! │                                                                         │
//! │  logipro-app errors                                                    │
//! │  └── ApiError         - What the screens see (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Screen                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every failing validation stage has its own variant, so the form can
//!    point at the exact problem (length vs. prefix vs. checksum)
//! 3. `Display` is the Turkish message shown under the form field

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Validators never panic; they return one of these. The `Display` text is
/// the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} alanı zorunludur")]
    Required { field: String },

    /// The value could not be read as a number.
    #[error("{field} geçerli bir sayı olmalıdır")]
    NotANumber { field: String },

    /// The value must be greater than zero.
    #[error("{field} sıfırdan büyük olmalıdır")]
    MustBePositive { field: String },

    /// Too many digits after the decimal separator.
    #[error("{field} en fazla {max} ondalık basamak içerebilir")]
    TooManyDecimals { field: String, max: u32 },

    // -------------------------------------------------------------------------
    // Phone
    // -------------------------------------------------------------------------
    /// Neither `5XXXXXXXXX` nor `905XXXXXXXXX` after stripping non-digits.
    #[error("Geçerli bir telefon numarası giriniz (5XX XXX XX XX)")]
    InvalidPhone,

    // -------------------------------------------------------------------------
    // IBAN
    // -------------------------------------------------------------------------
    /// IBAN does not start with the country code `TR`.
    #[error("IBAN TR ile başlamalıdır")]
    IbanMissingPrefix,

    /// IBAN is not exactly 26 characters after normalization.
    #[error("IBAN 26 karakter olmalıdır ({actual} karakter girildi)")]
    IbanWrongLength { actual: usize },

    /// Something other than a digit follows `TR`.
    #[error("IBAN'da TR'den sonra yalnızca rakam bulunmalıdır")]
    IbanNonDigit,

    /// ISO 7064 mod-97 check failed.
    #[error("Geçersiz IBAN numarası")]
    IbanChecksum,

    // -------------------------------------------------------------------------
    // TC Kimlik
    // -------------------------------------------------------------------------
    #[error("TC Kimlik numarası 11 haneli olmalıdır")]
    TcIdWrongLength,

    #[error("TC Kimlik numarası yalnızca rakamlardan oluşmalıdır")]
    TcIdNonDigit,

    #[error("TC Kimlik numarası 0 ile başlayamaz")]
    TcIdLeadingZero,

    /// Check digit 10 or 11 does not match.
    #[error("Geçersiz TC Kimlik numarası")]
    TcIdChecksum,

    // -------------------------------------------------------------------------
    // E-mail
    // -------------------------------------------------------------------------
    #[error("Geçerli bir e-posta adresi giriniz")]
    InvalidEmail,

    #[error("E-posta adresi en fazla {max} karakter olabilir")]
    EmailTooLong { max: usize },

    #[error("E-posta adresinin @ öncesi kısmı en fazla {max} karakter olabilir")]
    EmailLocalPartTooLong { max: usize },

    /// Local part starts/ends with a dot or contains `..`.
    #[error("E-posta adresinde nokta kullanımı geçersiz")]
    EmailDotPlacement,

    // -------------------------------------------------------------------------
    // Password
    // -------------------------------------------------------------------------
    #[error("Şifre en az {min} karakter olmalıdır")]
    PasswordTooShort { min: usize },

    #[error("Şifre en az bir büyük harf içermelidir")]
    PasswordMissingUppercase,

    #[error("Şifre en az bir küçük harf içermelidir")]
    PasswordMissingLowercase,

    #[error("Şifre en az bir rakam içermelidir")]
    PasswordMissingDigit,

    // -------------------------------------------------------------------------
    // Dates
    // -------------------------------------------------------------------------
    #[error("Yükleme tarihi geçmiş bir tarih olamaz")]
    LoadingDateInPast,

    #[error("Teslim tarihi geçmiş bir tarih olamaz")]
    DeliveryDateInPast,

    #[error("Teslim tarihi yükleme tarihinden sonra olmalıdır")]
    DeliveryNotAfterLoading,

    #[error("Teslim tarihi yükleme tarihinden en fazla {max_months} ay sonra olabilir")]
    SpanTooLong { max_months: u32 },

    #[error("Tamamlanma tarihi yükleme tarihinden önce olamaz")]
    CompletionBeforeLoading,
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A stored job carries an amount that cannot be parsed.
    ///
    /// ## When This Occurs
    /// Documents written before validation existed may hold text such as
    /// `"1.500 TL"` in a cost field. The commission screen reports the job
    /// instead of counting it as zero.
    #[error("{job_id} numaralı işte {field} okunamadı: {source}")]
    InvalidAmount {
        job_id: String,
        field: String,
        #[source]
        source: ValidationError,
    },

    /// A total exceeded the representable range.
    #[error("Tutar hesaplanırken taşma oluştu")]
    AmountOverflow,

    /// Validation error (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("Firma adı");
        assert_eq!(err.to_string(), "Firma adı alanı zorunludur");

        let err = ValidationError::IbanWrongLength { actual: 24 };
        assert_eq!(err.to_string(), "IBAN 26 karakter olmalıdır (24 karakter girildi)");

        let err = ValidationError::PasswordTooShort { min: 8 };
        assert_eq!(err.to_string(), "Şifre en az 8 karakter olmalıdır");
    }

    #[test]
    fn test_invalid_amount_message() {
        let err = CoreError::InvalidAmount {
            job_id: "job-1".to_string(),
            field: "Komisyon".to_string(),
            source: ValidationError::NotANumber {
                field: "Komisyon".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "job-1 numaralı işte Komisyon okunamadı: Komisyon geçerli bir sayı olmalıdır"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::InvalidPhone.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), ValidationError::InvalidPhone.to_string());
    }
}
