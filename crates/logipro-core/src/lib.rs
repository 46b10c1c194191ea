//! # logipro-core: Pure Business Logic for LogisticsPRO
//!
//! This crate is the **heart** of LogisticsPRO. It contains the validation
//! rules, search filters and money math as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        LogisticsPRO Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile / Web Screens                         │   │
//! │  │   Carriers ──► Companies ──► Jobs ──► Commissions ──► IBANs     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 logipro-app (screen state + commands)           │   │
//! │  │    debounced search, delete confirmation, create_carrier ...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ logipro-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  search   │  │ validation│  │   │
//! │  │   │  Carrier  │  │   Money   │  │  filters  │  │ IBAN, TC  │  │   │
//! │  │   │  Job      │  │  Tonnage  │  │           │  │ phone ... │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 logipro-store (Document Store)                  │   │
//! │  │           users/{uid}/data/{collection}/{id} on SQLite          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Carrier, Company, jobs, IBAN)
//! - [`money`] - Money and tonnage parsed from free-text fields
//! - [`error`] - Domain error types
//! - [`validation`] - Field and record validation
//! - [`search`] - Case-insensitive substring filters
//! - [`commission`] - Commission totals over completed jobs
//!
//! ## Example Usage
//!
//! ```rust
//! use logipro_core::validation::{validate_iban, validate_phone_number};
//!
//! assert!(validate_iban("TR33 0006 1005 1978 6457 8413 26").is_ok());
//! assert!(validate_phone_number("532 123 45 67").is_ok());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod commission;
pub mod error;
pub mod money;
pub mod search;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use commission::CommissionSummary;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Tonnage};
pub use search::Searchable;
pub use types::*;
pub use validation::{ValidationOutcome, ValidationResult};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Debounce delay used by search screens unless configured otherwise.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Minimum password length for every account path.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum span between loading and delivery dates, in calendar months.
pub const MAX_JOB_SPAN_MONTHS: u32 = 12;
