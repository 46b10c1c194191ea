//! # Validation Module
//!
//! Field and record validation for LogisticsPRO.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Screen                                                       │
//! │  ├── Calls the field validators on blur / submit                       │
//! │  └── Shows ValidationOutcome.error under the field                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command (logipro-app)                                        │
//! │  └── Runs the record validators (validate_carrier, ...) again          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Document store                                               │
//! │  └── Stores whatever passed; no schema of its own                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every validator is a pure function. Failures come back as a
//! [`ValidationError`] whose `Display` is the Turkish message for the form;
//! nothing in here panics.
//!
//! ## Usage
//! ```rust
//! use logipro_core::validation::{validate_iban, validate_tc_id_number};
//! use logipro_core::ValidationError;
//!
//! assert!(validate_tc_id_number("10000000146").is_ok());
//! assert_eq!(
//!     validate_iban("TR000000000000000000000000"),
//!     Err(ValidationError::IbanChecksum)
//! );
//! ```

use chrono::{Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{Money, Tonnage};
use crate::types::{Carrier, CarrierAvailability, CompletedJob, Company, Iban, PlannedJob};
use crate::{MAX_JOB_SPAN_MONTHS, MIN_PASSWORD_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const IBAN_LENGTH: usize = 26;
const EMAIL_MAX_LENGTH: usize = 254;
const EMAIL_LOCAL_MAX_LENGTH: usize = 64;

// =============================================================================
// Outcome Shape
// =============================================================================

/// The `{ isValid, error? }` shape screens bind to.
///
/// ```rust
/// use logipro_core::validation::{validate_phone_number, ValidationOutcome};
///
/// let outcome = ValidationOutcome::from(validate_phone_number("123"));
/// assert!(!outcome.is_valid);
/// assert!(outcome.error.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        ValidationOutcome {
            is_valid: true,
            error: None,
        }
    }
}

impl From<ValidationResult<()>> for ValidationOutcome {
    fn from(result: ValidationResult<()>) -> Self {
        match result {
            Ok(()) => ValidationOutcome::valid(),
            Err(err) => ValidationOutcome {
                is_valid: false,
                error: Some(err.to_string()),
            },
        }
    }
}

// =============================================================================
// Generic Field Validators
// =============================================================================

/// Checks that a field is not blank.
///
/// ## Example
/// ```rust
/// use logipro_core::validation::validate_not_empty;
///
/// assert!(validate_not_empty("Ankara", "Teslim yeri").is_ok());
/// assert!(validate_not_empty("   ", "Teslim yeri").is_err());
/// ```
pub fn validate_not_empty(value: &str, field_name: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field_name));
    }
    Ok(())
}

/// Checks that a field holds a number greater than zero.
///
/// Accepts `.` or `,` as the decimal separator (`"24,5"`). A leading minus
/// sign is read, so `"-3"` fails as not positive rather than not a number.
pub fn validate_positive_number(value: &str, field_name: &str) -> ValidationResult<()> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::required(field_name));
    }

    let (negative, unsigned) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };

    let (whole, fraction) = match unsigned.find(['.', ',']) {
        Some(pos) => (&unsigned[..pos], &unsigned[pos + 1..]),
        None => (unsigned, ""),
    };

    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !is_digits(whole) || !is_digits(fraction) || (whole.is_empty() && fraction.is_empty()) {
        return Err(ValidationError::NotANumber {
            field: field_name.to_string(),
        });
    }

    let is_zero = whole.chars().chain(fraction.chars()).all(|c| c == '0');
    if negative || is_zero {
        return Err(ValidationError::MustBePositive {
            field: field_name.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Phone
// =============================================================================

/// Validates a Turkish mobile number.
///
/// ## Rules
/// After removing every non-digit character the number must be either
/// - 10 digits starting with `5` (`532 123 45 67`), or
/// - 12 digits starting with `90` (`+90 532 123 45 67`).
///
/// The 11-digit form with a leading trunk zero (`0532 123 45 67`) is not
/// accepted.
///
/// ## Example
/// ```rust
/// use logipro_core::validation::validate_phone_number;
///
/// assert!(validate_phone_number("+90 (532) 123 45 67").is_ok());
/// assert!(validate_phone_number("0532 123 45 67").is_err());
/// ```
pub fn validate_phone_number(phone: &str) -> ValidationResult<()> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    let valid = (digits.len() == 10 && digits.starts_with('5'))
        || (digits.len() == 12 && digits.starts_with("90"));

    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

// =============================================================================
// IBAN
// =============================================================================

/// Strips whitespace and uppercases an IBAN for storage and checking.
pub fn normalize_iban(iban: &str) -> String {
    iban.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Validates a Turkish IBAN.
///
/// ## Stages
/// ```text
/// "tr33 0006 1005 ..."  ──► normalize ──► "TR330006100519786457841326"
///                                                │
///   1. starts with "TR"?            IbanMissingPrefix
///   2. exactly 26 characters?       IbanWrongLength
///   3. 24 digits after "TR"?        IbanNonDigit
///   4. ISO 7064 mod-97 == 1?        IbanChecksum
/// ```
///
/// The mod-97 remainder is folded one character at a time, so no big-integer
/// type is needed.
pub fn validate_iban(iban: &str) -> ValidationResult<()> {
    let iban = normalize_iban(iban);

    if !iban.starts_with("TR") {
        return Err(ValidationError::IbanMissingPrefix);
    }

    let length = iban.chars().count();
    if length != IBAN_LENGTH {
        return Err(ValidationError::IbanWrongLength { actual: length });
    }

    if !iban[2..].chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::IbanNonDigit);
    }

    if iban_mod97(&iban) != Some(1) {
        return Err(ValidationError::IbanChecksum);
    }

    Ok(())
}

/// Moves the first four characters to the end, maps `A..Z` to `10..35` and
/// returns the value mod 97. `None` for characters outside `0-9A-Z`.
fn iban_mod97(iban: &str) -> Option<u32> {
    let (head, tail) = iban.split_at(4);

    tail.chars()
        .chain(head.chars())
        .try_fold(0u32, |remainder, c| match c {
            '0'..='9' => Some((remainder * 10 + c.to_digit(10)?) % 97),
            'A'..='Z' => Some((remainder * 100 + c.to_digit(36)?) % 97),
            _ => None,
        })
}

// =============================================================================
// TC Kimlik
// =============================================================================

/// Validates a Turkish national identity number.
///
/// ## Rules
/// - exactly 11 digits, first digit not zero; surrounding whitespace is
///   not stripped
/// - `odd = d0 + d2 + d4 + d6 + d8`, `even = d1 + d3 + d5 + d7`
/// - `d9 == (odd * 7 - even) mod 10`
/// - `d10 == (d0 + ... + d9) mod 10`
///
/// ## Example
/// ```rust
/// use logipro_core::validation::validate_tc_id_number;
///
/// assert!(validate_tc_id_number("10000000146").is_ok());
/// assert!(validate_tc_id_number("10000000147").is_err());
/// ```
pub fn validate_tc_id_number(id: &str) -> ValidationResult<()> {
    if id.chars().count() != 11 {
        return Err(ValidationError::TcIdWrongLength);
    }

    let digits: Vec<i32> = id
        .chars()
        .map(|c| c.to_digit(10).map(|d| d as i32))
        .collect::<Option<_>>()
        .ok_or(ValidationError::TcIdNonDigit)?;

    if digits[0] == 0 {
        return Err(ValidationError::TcIdLeadingZero);
    }

    let odd: i32 = digits[..9].iter().step_by(2).sum();
    let even: i32 = digits[1..8].iter().step_by(2).sum();

    if digits[9] != (odd * 7 - even).rem_euclid(10) {
        return Err(ValidationError::TcIdChecksum);
    }

    let first_ten: i32 = digits[..10].iter().sum();
    if digits[10] != first_ten % 10 {
        return Err(ValidationError::TcIdChecksum);
    }

    Ok(())
}

// =============================================================================
// E-mail
// =============================================================================

/// Validates an e-mail address.
///
/// ## Rules
/// - shape `local@domain.tld`: one `@`, no whitespace, a dot inside the
///   domain with text on both sides
/// - at most 254 characters, local part at most 64
/// - local part does not start or end with `.` and has no `..`
///
/// The address is checked as given. Callers trim form input first.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if email.trim().is_empty() {
        return Err(ValidationError::required("E-posta"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or(ValidationError::InvalidEmail)?;

    let clean = |s: &str| !s.is_empty() && !s.chars().any(|c| c.is_whitespace() || c == '@');
    let has_inner_dot = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());

    if !clean(local) || !clean(domain) || !has_inner_dot {
        return Err(ValidationError::InvalidEmail);
    }

    if email.chars().count() > EMAIL_MAX_LENGTH {
        return Err(ValidationError::EmailTooLong {
            max: EMAIL_MAX_LENGTH,
        });
    }

    if local.chars().count() > EMAIL_LOCAL_MAX_LENGTH {
        return Err(ValidationError::EmailLocalPartTooLong {
            max: EMAIL_LOCAL_MAX_LENGTH,
        });
    }

    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return Err(ValidationError::EmailDotPlacement);
    }

    Ok(())
}

// =============================================================================
// Password
// =============================================================================

/// Strict password rule used when a signed-in user changes their password.
///
/// At least 8 characters with an uppercase letter, a lowercase letter and a
/// digit.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    validate_password_basic(password)?;

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::PasswordMissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(ValidationError::PasswordMissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PasswordMissingDigit);
    }

    Ok(())
}

/// Length-only password rule used by sign-up and admin approval.
pub fn validate_password_basic(password: &str) -> ValidationResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

// =============================================================================
// Dates
// =============================================================================

/// Validates a job's loading and delivery dates against today's local date.
///
/// See [`validate_date_logic_on`] for the rules.
pub fn validate_date_logic(
    loading: NaiveDate,
    delivery: NaiveDate,
    allow_past_dates: bool,
) -> ValidationResult<()> {
    validate_date_logic_on(loading, delivery, allow_past_dates, Local::now().date_naive())
}

/// Validates a job's loading and delivery dates relative to `today`.
///
/// ## Rules (checked in this order)
/// 1. unless `allow_past_dates`: loading and delivery are not before `today`
/// 2. delivery is strictly after loading
/// 3. delivery is at most 12 calendar months after loading
///
/// A loading date of 29 February maps to 28 February of the next year.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use logipro_core::validation::validate_date_logic_on;
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
/// let today = d(1, 1);
///
/// assert!(validate_date_logic_on(d(1, 5), d(1, 10), false, today).is_ok());
/// assert!(validate_date_logic_on(d(1, 10), d(1, 5), false, today).is_err());
/// ```
pub fn validate_date_logic_on(
    loading: NaiveDate,
    delivery: NaiveDate,
    allow_past_dates: bool,
    today: NaiveDate,
) -> ValidationResult<()> {
    if !allow_past_dates {
        if loading < today {
            return Err(ValidationError::LoadingDateInPast);
        }
        if delivery < today {
            return Err(ValidationError::DeliveryDateInPast);
        }
    }

    if delivery <= loading {
        return Err(ValidationError::DeliveryNotAfterLoading);
    }

    let span_too_long = match loading.checked_add_months(Months::new(MAX_JOB_SPAN_MONTHS)) {
        Some(limit) => delivery > limit,
        None => true,
    };
    if span_too_long {
        return Err(ValidationError::SpanTooLong {
            max_months: MAX_JOB_SPAN_MONTHS,
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a carrier before it is saved.
pub fn validate_carrier(carrier: &Carrier) -> ValidationResult<()> {
    validate_not_empty(&carrier.name, "Ad Soyad")?;
    validate_phone_number(&carrier.phone)?;
    if let Some(national_id) = carrier.national_id.as_deref() {
        if !national_id.trim().is_empty() {
            validate_tc_id_number(national_id)?;
        }
    }
    validate_not_empty(&carrier.plate, "Plaka")?;
    Ok(())
}

pub fn validate_company(company: &Company) -> ValidationResult<()> {
    validate_not_empty(&company.name, "Firma adı")?;
    validate_phone_number(&company.phone)?;
    Ok(())
}

/// Fields shared by planned and completed jobs.
struct JobFields<'a> {
    company_id: &'a str,
    cargo_type: &'a str,
    tonnage: &'a str,
    loading_location: &'a str,
    delivery_location: &'a str,
    transportation_cost: &'a str,
    commission_cost: &'a str,
}

fn validate_job_fields(job: JobFields<'_>) -> ValidationResult<()> {
    validate_not_empty(job.company_id, "Firma")?;
    validate_not_empty(job.cargo_type, "Yük tipi")?;
    if !job.tonnage.trim().is_empty() {
        Tonnage::parse(job.tonnage, "Tonaj")?;
    }
    validate_not_empty(job.loading_location, "Yükleme yeri")?;
    validate_not_empty(job.delivery_location, "Teslim yeri")?;

    if !Money::parse(job.transportation_cost, "Nakliye ücreti")?.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "Nakliye ücreti".to_string(),
        });
    }
    Money::parse(job.commission_cost, "Komisyon")?;

    Ok(())
}

/// Validates a planned job. `allow_past_dates` comes from configuration.
pub fn validate_planned_job(job: &PlannedJob, allow_past_dates: bool) -> ValidationResult<()> {
    validate_job_fields(JobFields {
        company_id: &job.company_id,
        cargo_type: &job.cargo_type,
        tonnage: &job.tonnage,
        loading_location: &job.loading_location,
        delivery_location: &job.delivery_location,
        transportation_cost: &job.transportation_cost,
        commission_cost: &job.commission_cost,
    })?;
    validate_date_logic(job.loading_date, job.delivery_date, allow_past_dates)
}

/// Validates a completed job.
///
/// Completed jobs describe the past, so only date order and span are
/// checked, plus completion not preceding loading.
pub fn validate_completed_job(job: &CompletedJob) -> ValidationResult<()> {
    validate_job_fields(JobFields {
        company_id: &job.company_id,
        cargo_type: &job.cargo_type,
        tonnage: &job.tonnage,
        loading_location: &job.loading_location,
        delivery_location: &job.delivery_location,
        transportation_cost: &job.transportation_cost,
        commission_cost: &job.commission_cost,
    })?;
    validate_not_empty(&job.carrier_id, "Taşıyıcı")?;
    validate_date_logic_on(job.loading_date, job.delivery_date, true, job.loading_date)?;

    if job.completion_date < job.loading_date {
        return Err(ValidationError::CompletionBeforeLoading);
    }

    Ok(())
}

pub fn validate_iban_record(iban: &Iban) -> ValidationResult<()> {
    validate_not_empty(&iban.name_surname, "Ad Soyad")?;
    validate_iban(&iban.iban_number)
}

pub fn validate_carrier_availability(availability: &CarrierAvailability) -> ValidationResult<()> {
    validate_not_empty(&availability.carrier_name, "Taşıyıcı adı")?;
    validate_phone_number(&availability.phone)?;
    validate_not_empty(&availability.current_location, "Bulunduğu yer")?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validate_phone_number() {
        assert!(validate_phone_number("5321234567").is_ok());
        assert!(validate_phone_number("532 123 45 67").is_ok());
        assert!(validate_phone_number("905321234567").is_ok());
        assert!(validate_phone_number("+90 532 123 45 67").is_ok());

        assert_eq!(validate_phone_number(""), Err(ValidationError::InvalidPhone));
        assert!(validate_phone_number("4321234567").is_err());
        assert!(validate_phone_number("53212345").is_err());
        assert!(validate_phone_number("915321234567").is_err());
    }

    #[test]
    fn test_phone_with_trunk_zero_is_rejected() {
        // 11 digits: neither accepted shape, even though it is how numbers
        // are commonly written.
        assert_eq!(
            validate_phone_number("0532 123 45 67"),
            Err(ValidationError::InvalidPhone)
        );
    }

    #[test]
    fn test_validate_iban() {
        assert!(validate_iban("TR330006100519786457841326").is_ok());
        assert!(validate_iban("tr33 0006 1005 1978 6457 8413 26").is_ok());

        assert_eq!(
            validate_iban("TR000000000000000000000000"),
            Err(ValidationError::IbanChecksum)
        );
        assert_eq!(
            validate_iban("DE89370400440532013000"),
            Err(ValidationError::IbanMissingPrefix)
        );
        assert_eq!(
            validate_iban("TR33000610051978645784"),
            Err(ValidationError::IbanWrongLength { actual: 22 })
        );
        assert_eq!(
            validate_iban("TR33000610051978645784132X"),
            Err(ValidationError::IbanNonDigit)
        );
    }

    #[test]
    fn test_normalize_iban() {
        assert_eq!(
            normalize_iban(" tr33 0006 1005 1978 6457 8413 26 "),
            "TR330006100519786457841326"
        );
    }

    #[test]
    fn test_validate_tc_id_number() {
        assert!(validate_tc_id_number("10000000146").is_ok());

        assert_eq!(
            validate_tc_id_number("10000000147"),
            Err(ValidationError::TcIdChecksum)
        );
        assert_eq!(
            validate_tc_id_number("10000000156"),
            Err(ValidationError::TcIdChecksum)
        );
        assert_eq!(
            validate_tc_id_number("1000000014"),
            Err(ValidationError::TcIdWrongLength)
        );
        assert_eq!(
            validate_tc_id_number("1000000014a"),
            Err(ValidationError::TcIdNonDigit)
        );
        assert_eq!(
            validate_tc_id_number("01234567890"),
            Err(ValidationError::TcIdLeadingZero)
        );
        assert_eq!(
            validate_tc_id_number(" 10000000146"),
            Err(ValidationError::TcIdWrongLength)
        );
        assert_eq!(
            validate_tc_id_number(" 1000000014"),
            Err(ValidationError::TcIdNonDigit)
        );
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ali@example.com").is_ok());
        assert!(validate_email("ali.veli@mail.example.com.tr").is_ok());

        assert!(validate_email("").is_err());
        assert_eq!(validate_email(" ali@example.com "), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("ali.example.com"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("ali@example"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("ali@.com"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("ali@example."), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("a li@example.com"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("a@b@example.com"), Err(ValidationError::InvalidEmail));

        assert_eq!(
            validate_email(".ali@example.com"),
            Err(ValidationError::EmailDotPlacement)
        );
        assert_eq!(
            validate_email("ali..veli@example.com"),
            Err(ValidationError::EmailDotPlacement)
        );

        let long_local = format!("{}@example.com", "a".repeat(65));
        assert_eq!(
            validate_email(&long_local),
            Err(ValidationError::EmailLocalPartTooLong { max: 64 })
        );

        let long_domain = format!("ali@{}.com", "a".repeat(250));
        assert_eq!(
            validate_email(&long_domain),
            Err(ValidationError::EmailTooLong { max: 254 })
        );
    }

    #[test]
    fn test_password_variants_differ() {
        assert!(validate_password_basic("abcdefgh").is_ok());
        assert_eq!(
            validate_password("abcdefgh"),
            Err(ValidationError::PasswordMissingUppercase)
        );
        assert_eq!(
            validate_password("ABCDEFGH"),
            Err(ValidationError::PasswordMissingLowercase)
        );
        assert_eq!(
            validate_password("Abcdefgh"),
            Err(ValidationError::PasswordMissingDigit)
        );
        assert!(validate_password("Abcdefg1").is_ok());

        assert_eq!(
            validate_password_basic("kısa"),
            Err(ValidationError::PasswordTooShort { min: 8 })
        );
        assert!(validate_password("Ab1").is_err());
    }

    #[test]
    fn test_date_logic_order() {
        let today = date(2024, 1, 1);
        assert_eq!(
            validate_date_logic_on(date(2024, 1, 10), date(2024, 1, 5), false, today),
            Err(ValidationError::DeliveryNotAfterLoading)
        );
        assert_eq!(
            validate_date_logic_on(date(2024, 1, 10), date(2024, 1, 10), false, today),
            Err(ValidationError::DeliveryNotAfterLoading)
        );
    }

    #[test]
    fn test_date_logic_past_dates() {
        let today = date(2024, 6, 1);
        assert_eq!(
            validate_date_logic_on(date(2024, 5, 31), date(2024, 6, 5), false, today),
            Err(ValidationError::LoadingDateInPast)
        );
        assert!(validate_date_logic_on(date(2024, 6, 1), date(2024, 6, 5), false, today).is_ok());
        assert!(validate_date_logic_on(date(2024, 5, 1), date(2024, 5, 5), true, today).is_ok());
    }

    #[test]
    fn test_date_logic_delivery_in_past() {
        let today = date(2024, 6, 1);
        assert_eq!(
            validate_date_logic_on(today, date(2024, 5, 31), false, today),
            Err(ValidationError::DeliveryDateInPast)
        );
        // With past dates allowed the order rule reports it instead.
        assert_eq!(
            validate_date_logic_on(today, date(2024, 5, 31), true, today),
            Err(ValidationError::DeliveryNotAfterLoading)
        );
    }

    #[test]
    fn test_date_logic_one_year_span() {
        let today = date(2024, 1, 1);
        assert!(validate_date_logic_on(date(2024, 3, 15), date(2025, 3, 15), false, today).is_ok());
        assert_eq!(
            validate_date_logic_on(date(2024, 3, 15), date(2025, 3, 16), false, today),
            Err(ValidationError::SpanTooLong { max_months: 12 })
        );
        // Leap day clamps to 28 February.
        assert!(validate_date_logic_on(date(2024, 2, 29), date(2025, 2, 28), true, today).is_ok());
        assert!(validate_date_logic_on(date(2024, 2, 29), date(2025, 3, 1), true, today).is_err());
    }

    #[test]
    fn test_not_empty_and_positive() {
        assert!(validate_not_empty("x", "Alan").is_ok());
        assert_eq!(
            validate_not_empty("  ", "Alan").unwrap_err().to_string(),
            "Alan alanı zorunludur"
        );

        assert!(validate_positive_number("24,5", "Tonaj").is_ok());
        assert!(validate_positive_number("0.01", "Tonaj").is_ok());
        assert!(matches!(
            validate_positive_number("0", "Tonaj"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_positive_number("-3", "Tonaj"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_positive_number("on beş", "Tonaj"),
            Err(ValidationError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_outcome_shape() {
        let ok = ValidationOutcome::from(validate_iban("TR330006100519786457841326"));
        assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"isValid":true}"#);

        let bad = ValidationOutcome::from(validate_tc_id_number("123"));
        assert_eq!(
            serde_json::to_value(&bad).unwrap(),
            serde_json::json!({
                "isValid": false,
                "error": "TC Kimlik numarası 11 haneli olmalıdır"
            })
        );
    }

    #[test]
    fn test_validate_carrier_record() {
        let now = Utc::now();
        let mut carrier = Carrier {
            id: String::new(),
            name: "Mehmet Yılmaz".to_string(),
            phone: "532 123 45 67".to_string(),
            national_id: Some("10000000146".to_string()),
            plate: "34 ABC 123".to_string(),
            dorse_plate: None,
            vehicle_type: Default::default(),
            created_at: now,
            updated_at: now,
        };
        assert!(validate_carrier(&carrier).is_ok());

        carrier.national_id = Some(String::new());
        assert!(validate_carrier(&carrier).is_ok());

        carrier.national_id = Some("10000000147".to_string());
        assert_eq!(validate_carrier(&carrier), Err(ValidationError::TcIdChecksum));
    }

    #[test]
    fn test_validate_completed_job_record() {
        let now = Utc::now();
        let mut job = CompletedJob {
            id: String::new(),
            company_id: "co1".to_string(),
            carrier_id: "car1".to_string(),
            cargo_type: "Demir".to_string(),
            tonnage: "24,5".to_string(),
            dimensions: None,
            loading_location: "İzmir".to_string(),
            delivery_location: "Ankara".to_string(),
            loading_date: date(2023, 3, 1),
            delivery_date: date(2023, 3, 3),
            completion_date: date(2023, 3, 3),
            transportation_cost: "15000".to_string(),
            commission_cost: "1500".to_string(),
            notes: None,
            commission_paid: false,
            created_at: now,
            updated_at: now,
        };
        assert!(validate_completed_job(&job).is_ok());

        job.completion_date = date(2023, 2, 28);
        assert_eq!(
            validate_completed_job(&job),
            Err(ValidationError::CompletionBeforeLoading)
        );

        job.completion_date = date(2023, 3, 3);
        job.transportation_cost = "15 bin".to_string();
        assert!(matches!(
            validate_completed_job(&job),
            Err(ValidationError::NotANumber { .. })
        ));
    }
}
