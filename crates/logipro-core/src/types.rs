//! # Domain Types
//!
//! Core domain types used throughout LogisticsPRO.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Carrier      │   │    Company      │   │      Iban       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name, phone    │   │  name, phone    │   │  name_surname   │       │
//! │  │  national_id?   │   │  address        │   │  iban_number    │       │
//! │  │  plate, dorse?  │   │  contact_person │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │   PlannedJob    │──►│  CompletedJob   │   │ CarrierAvailability │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  company_id     │   │  + carrier_id   │   │  carrier_name       │   │
//! │  │  cargo, dates   │   │  + completion   │   │  current_location   │   │
//! │  │  costs (text)   │   │  + comm. paid   │   │  available_date     │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Document Shape
//! Every entity is stored as a JSON object under
//! `users/{uid}/data/{collection}/{id}`, so field names are camelCase and
//! cost fields stay free text on the wire. Use [`crate::money`] to read them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{Money, Tonnage};

// =============================================================================
// Identity Traits
// =============================================================================

/// Anything with a document id.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// An entity stored in a named collection of the user's document tree.
pub trait Document: Identifiable + Serialize + DeserializeOwned + Send + Sync {
    /// Collection segment in `users/{uid}/data/{collection}/{id}`.
    const COLLECTION: &'static str;

    /// Assigns the id generated by the store on insert.
    fn set_id(&mut self, id: String);
}

macro_rules! impl_document {
    ($ty:ty, $collection:literal) => {
        impl Identifiable for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        }

        impl Document for $ty {
            const COLLECTION: &'static str = $collection;

            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        }
    };
}

// =============================================================================
// Vehicle Type
// =============================================================================

/// Kind of vehicle a carrier drives.
///
/// Stored as a lowercase string. Values written by older app versions that
/// are not listed here read back as [`VehicleType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    /// Semi-trailer truck.
    #[default]
    Tir,
    Kamyon,
    Kamyonet,
    Panelvan,
    Lowbed,
    /// Refrigerated.
    Frigorifik,
    #[serde(other)]
    Other,
}

impl VehicleType {
    /// Display label used in lists.
    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Tir => "Tır",
            VehicleType::Kamyon => "Kamyon",
            VehicleType::Kamyonet => "Kamyonet",
            VehicleType::Panelvan => "Panelvan",
            VehicleType::Lowbed => "Lowbed",
            VehicleType::Frigorifik => "Frigorifik",
            VehicleType::Other => "Diğer",
        }
    }
}

// =============================================================================
// Carrier
// =============================================================================

/// A transport provider (driver + vehicle).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Carrier {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub phone: String,
    /// TC Kimlik number; optional for foreign drivers.
    #[serde(default)]
    pub national_id: Option<String>,
    /// Tractor plate.
    pub plate: String,
    /// Trailer ("dorse") plate.
    #[serde(default)]
    pub dorse_plate: Option<String>,
    #[serde(default)]
    pub vehicle_type: VehicleType,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl_document!(Carrier, "carriers");

// =============================================================================
// Company
// =============================================================================

/// The client firm commissioning a shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact_person: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl_document!(Company, "companies");

// =============================================================================
// Jobs
// =============================================================================

/// A prospective freight assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlannedJob {
    #[serde(default)]
    pub id: String,
    pub company_id: String,
    pub cargo_type: String,
    /// Free text, e.g. `"24,5"`. Read with [`PlannedJob::tonnage`].
    #[serde(default)]
    pub tonnage: String,
    #[serde(default)]
    pub dimensions: Option<String>,
    pub loading_location: String,
    pub delivery_location: String,
    #[ts(as = "String")]
    pub loading_date: NaiveDate,
    #[ts(as = "String")]
    pub delivery_date: NaiveDate,
    #[serde(default)]
    pub transportation_cost: String,
    #[serde(default)]
    pub commission_cost: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl_document!(PlannedJob, "plannedJobs");

impl PlannedJob {
    pub fn tonnage(&self) -> Result<Tonnage, ValidationError> {
        Tonnage::parse(&self.tonnage, "Tonaj")
    }

    pub fn transportation_cost(&self) -> Result<Money, ValidationError> {
        Money::parse(&self.transportation_cost, "Nakliye ücreti")
    }

    pub fn commission_cost(&self) -> Result<Money, ValidationError> {
        Money::parse(&self.commission_cost, "Komisyon")
    }
}

/// A finalized freight assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CompletedJob {
    #[serde(default)]
    pub id: String,
    pub company_id: String,
    pub carrier_id: String,
    pub cargo_type: String,
    #[serde(default)]
    pub tonnage: String,
    #[serde(default)]
    pub dimensions: Option<String>,
    pub loading_location: String,
    pub delivery_location: String,
    #[ts(as = "String")]
    pub loading_date: NaiveDate,
    #[ts(as = "String")]
    pub delivery_date: NaiveDate,
    #[ts(as = "String")]
    pub completion_date: NaiveDate,
    #[serde(default)]
    pub transportation_cost: String,
    #[serde(default)]
    pub commission_cost: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub commission_paid: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl_document!(CompletedJob, "completedJobs");

impl CompletedJob {
    /// Builds the completed record for a planned job.
    ///
    /// The new record gets a fresh id from the store; cargo, route, dates
    /// and costs are copied from the plan.
    pub fn from_planned(
        job: &PlannedJob,
        carrier_id: impl Into<String>,
        completion_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        CompletedJob {
            id: String::new(),
            company_id: job.company_id.clone(),
            carrier_id: carrier_id.into(),
            cargo_type: job.cargo_type.clone(),
            tonnage: job.tonnage.clone(),
            dimensions: job.dimensions.clone(),
            loading_location: job.loading_location.clone(),
            delivery_location: job.delivery_location.clone(),
            loading_date: job.loading_date,
            delivery_date: job.delivery_date,
            completion_date,
            transportation_cost: job.transportation_cost.clone(),
            commission_cost: job.commission_cost.clone(),
            notes: job.notes.clone(),
            commission_paid: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn tonnage(&self) -> Result<Tonnage, ValidationError> {
        Tonnage::parse(&self.tonnage, "Tonaj")
    }

    pub fn transportation_cost(&self) -> Result<Money, ValidationError> {
        Money::parse(&self.transportation_cost, "Nakliye ücreti")
    }

    pub fn commission_cost(&self) -> Result<Money, ValidationError> {
        Money::parse(&self.commission_cost, "Komisyon")
    }
}

// =============================================================================
// Carrier Availability
// =============================================================================

/// A carrier announcing that their vehicle is free from a date and place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CarrierAvailability {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub carrier_id: Option<String>,
    pub carrier_name: String,
    pub phone: String,
    pub current_location: String,
    #[serde(default)]
    pub destination_preference: String,
    #[ts(as = "String")]
    pub available_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl_document!(CarrierAvailability, "carrierAvailabilities");

// =============================================================================
// IBAN
// =============================================================================

/// A bank account commissions are paid to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Iban {
    #[serde(default)]
    pub id: String,
    pub name_surname: String,
    /// Stored normalized: no spaces, uppercase.
    pub iban_number: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl_document!(Iban, "ibans");

impl Iban {
    /// Groups the number in blocks of four for display.
    ///
    /// ```rust
    /// # use chrono::Utc;
    /// # use logipro_core::Iban;
    /// let iban = Iban {
    ///     id: String::new(),
    ///     name_surname: "Ali Veli".into(),
    ///     iban_number: "TR330006100519786457841326".into(),
    ///     created_at: Utc::now(),
    /// };
    /// assert_eq!(iban.formatted(), "TR33 0006 1005 1978 6457 8413 26");
    /// ```
    pub fn formatted(&self) -> String {
        self.iban_number
            .chars()
            .collect::<Vec<_>>()
            .chunks(4)
            .map(|chunk| chunk.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
