//! # Money Module
//!
//! Typed readings of the free-text numeric fields on jobs.
//!
//! ## Why Not Floats?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FREE-TEXT PROBLEM                                                  │
//! │                                                                         │
//! │  Cost fields are typed by hand on a phone keyboard:                     │
//! │    "15000"   "15000,50"   "1.500"   "15 bin"                            │
//! │                                                                         │
//! │  Reading them with a lenient float parser:                              │
//! │    "15000,50" → 15000        (kuruş silently dropped)                  │
//! │    "15 bin"   → 15           (three zeros silently dropped)            │
//! │    "abc"      → NaN → 0      (job counted as free)                     │
//! │                                                                         │
//! │  OUR SOLUTION: Fixed-point integers + explicit parse errors             │
//! │    Money   = kuruş (1/100 TL) in an i64                                 │
//! │    Tonnage = kilograms in an i64                                        │
//! │    Anything that is not a plain decimal is a ValidationError           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use logipro_core::money::{Money, Tonnage};
//!
//! let cost = Money::parse("15000,50", "Nakliye ücreti").unwrap();
//! assert_eq!(cost.kurus(), 1_500_050);
//! assert_eq!(cost.to_string(), "15.000,50 TL");
//!
//! let load = Tonnage::parse("24.5", "Tonaj").unwrap();
//! assert_eq!(load.kilograms(), 24_500);
//!
//! assert!(Money::parse("15 bin", "Nakliye ücreti").is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Fixed-Point Parsing
// =============================================================================

/// Parses a plain decimal into an integer scaled by `10^scale`.
///
/// ## Accepted Input
/// - digits, optionally followed by one `.` or `,` and up to `scale` digits
/// - surrounding whitespace
///
/// Signs, thousands separators, units and exponents are rejected.
fn parse_fixed(input: &str, field: &str, scale: u32) -> Result<i64, ValidationError> {
    let value = input.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    let not_a_number = || ValidationError::NotANumber {
        field: field.to_string(),
    };

    let (whole, fraction) = match value.find(['.', ',']) {
        Some(pos) => (&value[..pos], &value[pos + 1..]),
        None => (value, ""),
    };

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) || (whole.is_empty() && fraction.is_empty()) {
        return Err(not_a_number());
    }

    if fraction.len() > scale as usize {
        return Err(ValidationError::TooManyDecimals {
            field: field.to_string(),
            max: scale,
        });
    }

    let multiplier = 10_i64.pow(scale);
    let whole_value = if whole.is_empty() {
        0
    } else {
        whole.parse::<i64>().map_err(|_| not_a_number())?
    };

    // "5" with scale 2 is 50 hundredths
    let fraction_value = if fraction.is_empty() {
        0
    } else {
        let padding = 10_i64.pow(scale - fraction.len() as u32);
        fraction.parse::<i64>().map_err(|_| not_a_number())? * padding
    };

    whole_value
        .checked_mul(multiplier)
        .and_then(|v| v.checked_add(fraction_value))
        .ok_or_else(not_a_number)
}

/// Formats `value` (scaled by `10^scale`) with Turkish separators.
///
/// Thousands are grouped with `.`, the decimal separator is `,`.
fn format_fixed(value: i64, scale: u32, fixed_decimals: bool) -> String {
    let multiplier = 10_i64.pow(scale);
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();
    let whole = abs / multiplier as u64;
    let fraction = abs % multiplier as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let mut fraction_text = format!("{:0width$}", fraction, width = scale as usize);
    if !fixed_decimals {
        while fraction_text.ends_with('0') {
            fraction_text.pop();
        }
    }

    if fraction_text.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{},{}", sign, grouped, fraction_text)
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// A Turkish lira amount in kuruş (1/100 TL).
///
/// ## Where Money is Used
/// ```text
/// PlannedJob.transportation_cost ("15000")  ──► Money::parse ──► 1_500_000
/// CompletedJob.commission_cost   ("1500,50") ──► Money::parse ──►   150_050
///                                                     │
///                                                     ▼
///                                         CommissionSummary totals
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from kuruş.
    #[inline]
    pub const fn from_kurus(kurus: i64) -> Self {
        Money(kurus)
    }

    /// Creates a Money value from whole lira and kuruş.
    ///
    /// ```rust
    /// use logipro_core::money::Money;
    ///
    /// assert_eq!(Money::from_lira_kurus(12, 50).kurus(), 1250);
    /// ```
    #[inline]
    pub const fn from_lira_kurus(lira: i64, kurus: i64) -> Self {
        Money(lira * 100 + kurus)
    }

    /// Parses a cost field typed by the user.
    ///
    /// ## Errors
    /// - blank → [`ValidationError::Required`]
    /// - not a plain decimal → [`ValidationError::NotANumber`]
    /// - more than two decimals → [`ValidationError::TooManyDecimals`]
    pub fn parse(input: &str, field: &str) -> Result<Self, ValidationError> {
        parse_fixed(input, field, 2).map(Money)
    }

    /// Returns the value in kuruş.
    #[inline]
    pub const fn kurus(&self) -> i64 {
        self.0
    }

    /// Returns the whole-lira part.
    #[inline]
    pub const fn lira(&self) -> i64 {
        self.0 / 100
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Addition that reports overflow instead of wrapping.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }
}

/// Renders `1.500,50 TL`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} TL", format_fixed(self.0, 2, true))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Tonnage Type
// =============================================================================

/// Cargo weight in kilograms, entered by users in tons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Tonnage(i64);

impl Tonnage {
    #[inline]
    pub const fn from_kilograms(kg: i64) -> Self {
        Tonnage(kg)
    }

    /// Parses a tonnage field (tons, up to three decimals = kilograms).
    pub fn parse(input: &str, field: &str) -> Result<Self, ValidationError> {
        parse_fixed(input, field, 3).map(Tonnage)
    }

    #[inline]
    pub const fn kilograms(&self) -> i64 {
        self.0
    }
}

/// Renders `24,5 ton`.
impl fmt::Display for Tonnage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ton", format_fixed(self.0, 3, false))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
