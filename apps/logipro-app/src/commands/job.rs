//! # Job Commands
//!
//! Planned jobs, completed jobs and commission tracking.
//!
//! ## Job Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  create_planned_job ──► plannedJobs/{id}                                │
//! │                              │                                          │
//! │                              │ complete_job(id, carrier, date)          │
//! │                              ▼                                          │
//! │                         completedJobs/{new id}    plannedJobs/{id}      │
//! │                         commission_paid = false   removed               │
//! │                              │                                          │
//! │                              │ mark_commission_paid(id, true)           │
//! │                              ▼                                          │
//! │                         commission_paid = true                          │
//! │                                                                         │
//! │  commission_summary ──► totals over every completed job                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Planned jobs reject past dates unless `[jobs] allow_past_dates` is set;
//! completed jobs always describe the past and only need consistent dates.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map};
use tracing::info;

use logipro_core::validation::{validate_completed_job, validate_planned_job};
use logipro_core::{Carrier, CommissionSummary, Company, CompletedJob, PlannedJob};

use super::{delete_one, get_one, insert_one, list_all, optional_text, search_all, update_one};
use crate::error::ApiError;
use crate::state::{AppConfig, DbState, SessionState};

// =============================================================================
// Inputs
// =============================================================================

/// Job form contents shared by planned and completed jobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInput {
    pub company_id: String,
    pub cargo_type: String,
    #[serde(default)]
    pub tonnage: String,
    #[serde(default)]
    pub dimensions: Option<String>,
    pub loading_location: String,
    pub delivery_location: String,
    pub loading_date: NaiveDate,
    pub delivery_date: NaiveDate,
    #[serde(default)]
    pub transportation_cost: String,
    #[serde(default)]
    pub commission_cost: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl JobInput {
    fn into_planned(self, id: String, created_at: DateTime<Utc>) -> PlannedJob {
        PlannedJob {
            id,
            company_id: self.company_id.trim().to_string(),
            cargo_type: self.cargo_type.trim().to_string(),
            tonnage: self.tonnage.trim().to_string(),
            dimensions: optional_text(self.dimensions),
            loading_location: self.loading_location.trim().to_string(),
            delivery_location: self.delivery_location.trim().to_string(),
            loading_date: self.loading_date,
            delivery_date: self.delivery_date,
            transportation_cost: self.transportation_cost.trim().to_string(),
            commission_cost: self.commission_cost.trim().to_string(),
            notes: optional_text(self.notes),
            created_at,
            updated_at: Utc::now(),
        }
    }
}

/// A completed job entered directly, without a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedJobInput {
    #[serde(flatten)]
    pub job: JobInput,
    pub carrier_id: String,
    pub completion_date: NaiveDate,
    #[serde(default)]
    pub commission_paid: bool,
}

impl CompletedJobInput {
    fn into_completed(self, id: String, created_at: DateTime<Utc>) -> CompletedJob {
        let plan = self.job.into_planned(String::new(), created_at);
        let mut done = CompletedJob::from_planned(
            &plan,
            self.carrier_id.trim(),
            self.completion_date,
            created_at,
        );
        done.id = id;
        done.commission_paid = self.commission_paid;
        done.updated_at = plan.updated_at;
        done
    }
}

/// Closing a planned job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteJobInput {
    pub carrier_id: String,
    /// Defaults to today.
    #[serde(default)]
    pub completion_date: Option<NaiveDate>,
}

/// Fails with `NOT_FOUND` naming the referenced record.
async fn ensure_company(db: &DbState, session: &SessionState, id: &str) -> Result<(), ApiError> {
    get_one::<Company>(db, session, id).await.map(|_| ())
}

async fn ensure_carrier(db: &DbState, session: &SessionState, id: &str) -> Result<(), ApiError> {
    get_one::<Carrier>(db, session, id).await.map(|_| ())
}

// =============================================================================
// Planned Jobs
// =============================================================================

pub async fn create_planned_job(
    db: &DbState,
    session: &SessionState,
    config: &AppConfig,
    input: JobInput,
) -> Result<PlannedJob, ApiError> {
    let job = input.into_planned(String::new(), Utc::now());
    validate_planned_job(&job, config.jobs.allow_past_dates)?;
    ensure_company(db, session, &job.company_id).await?;
    insert_one(db, session, job).await
}

pub async fn update_planned_job(
    db: &DbState,
    session: &SessionState,
    config: &AppConfig,
    id: &str,
    input: JobInput,
) -> Result<PlannedJob, ApiError> {
    let existing: PlannedJob = get_one(db, session, id).await?;
    let job = input.into_planned(existing.id, existing.created_at);
    validate_planned_job(&job, config.jobs.allow_past_dates)?;
    ensure_company(db, session, &job.company_id).await?;
    update_one(db, session, job).await
}

pub async fn list_planned_jobs(
    db: &DbState,
    session: &SessionState,
) -> Result<Vec<PlannedJob>, ApiError> {
    list_all(db, session).await
}

/// Matches loading location, delivery location or cargo type.
pub async fn search_planned_jobs(
    db: &DbState,
    session: &SessionState,
    query: &str,
) -> Result<Vec<PlannedJob>, ApiError> {
    search_all(db, session, query).await
}

pub async fn delete_planned_job(
    db: &DbState,
    session: &SessionState,
    id: &str,
) -> Result<bool, ApiError> {
    delete_one::<PlannedJob>(db, session, id).await
}

/// Turns a planned job into a completed one and removes the plan, both in
/// one write.
pub async fn complete_job(
    db: &DbState,
    session: &SessionState,
    planned_id: &str,
    input: CompleteJobInput,
) -> Result<CompletedJob, ApiError> {
    let plan: PlannedJob = get_one(db, session, planned_id).await?;

    let completion_date = input
        .completion_date
        .unwrap_or_else(|| Local::now().date_naive());
    let done = CompletedJob::from_planned(&plan, input.carrier_id.trim(), completion_date, Utc::now());

    validate_completed_job(&done)?;
    ensure_carrier(db, session, &done.carrier_id).await?;

    // One transaction: a retry after a failure never finds a half-moved job.
    let uid = session.user_id()?;
    let saved = db
        .collection::<CompletedJob>(uid)
        .insert_replacing::<PlannedJob>(planned_id, done)
        .await?;

    info!(%planned_id, completed_id = %saved.id, "Job completed");
    Ok(saved)
}

// =============================================================================
// Completed Jobs
// =============================================================================

pub async fn create_completed_job(
    db: &DbState,
    session: &SessionState,
    input: CompletedJobInput,
) -> Result<CompletedJob, ApiError> {
    let job = input.into_completed(String::new(), Utc::now());
    validate_completed_job(&job)?;
    ensure_company(db, session, &job.company_id).await?;
    ensure_carrier(db, session, &job.carrier_id).await?;
    insert_one(db, session, job).await
}

pub async fn update_completed_job(
    db: &DbState,
    session: &SessionState,
    id: &str,
    input: CompletedJobInput,
) -> Result<CompletedJob, ApiError> {
    let existing: CompletedJob = get_one(db, session, id).await?;
    let job = input.into_completed(existing.id, existing.created_at);
    validate_completed_job(&job)?;
    ensure_company(db, session, &job.company_id).await?;
    ensure_carrier(db, session, &job.carrier_id).await?;
    update_one(db, session, job).await
}

pub async fn list_completed_jobs(
    db: &DbState,
    session: &SessionState,
) -> Result<Vec<CompletedJob>, ApiError> {
    list_all(db, session).await
}

pub async fn search_completed_jobs(
    db: &DbState,
    session: &SessionState,
    query: &str,
) -> Result<Vec<CompletedJob>, ApiError> {
    search_all(db, session, query).await
}

pub async fn delete_completed_job(
    db: &DbState,
    session: &SessionState,
    id: &str,
) -> Result<bool, ApiError> {
    delete_one::<CompletedJob>(db, session, id).await
}

// =============================================================================
// Commissions
// =============================================================================

/// Sets the paid flag without rewriting the rest of the record.
pub async fn mark_commission_paid(
    db: &DbState,
    session: &SessionState,
    id: &str,
    paid: bool,
) -> Result<CompletedJob, ApiError> {
    let uid = session.user_id()?;

    let mut fields = Map::new();
    fields.insert("commissionPaid".to_string(), json!(paid));
    fields.insert("updatedAt".to_string(), json!(Utc::now()));

    let job = db.collection::<CompletedJob>(uid).patch(id, fields).await?;
    info!(%id, paid, "Commission status changed");
    Ok(job)
}

/// Paid/unpaid commission and transport revenue over all completed jobs.
pub async fn commission_summary(
    db: &DbState,
    session: &SessionState,
) -> Result<CommissionSummary, ApiError> {
    let jobs: Vec<CompletedJob> = list_all(db, session).await?;
    Ok(CommissionSummary::from_jobs(&jobs)?)
}

// =============================================================================
// Unit Tests
// =============================================================================
