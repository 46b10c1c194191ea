//! # Commission Module
//!
//! Totals shown on the commissions screen.
//!
//! ```text
//! CompletedJob[]                         CommissionSummary
//! ┌──────────────────────────────┐       ┌──────────────────────────────┐
//! │ commission "1500"   paid ✓   │──┐    │ paid       1.500,00 TL       │
//! │ commission "2000"   paid ✗   │──┼──► │ unpaid     2.750,50 TL       │
//! │ commission "750,50" paid ✗   │──┘    │ total      4.250,50 TL       │
//! └──────────────────────────────┘       │ revenue (transport costs)    │
//!                                        └──────────────────────────────┘
//! ```
//!
//! A job whose cost text cannot be read fails the whole summary with
//! [`CoreError::InvalidAmount`] naming the job, rather than counting it as
//! zero.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::CompletedJob;

/// Commission and revenue totals over a set of completed jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CommissionSummary {
    pub paid: Money,
    pub unpaid: Money,
    pub total: Money,
    /// Sum of transportation costs.
    pub transport_revenue: Money,
    pub job_count: u32,
    pub unpaid_job_count: u32,
}

impl CommissionSummary {
    /// Sums commissions and transport costs.
    ///
    /// ## Example
    /// ```rust
    /// use logipro_core::CommissionSummary;
    ///
    /// let summary = CommissionSummary::from_jobs(&[]).unwrap();
    /// assert!(summary.total.is_zero());
    /// ```
    pub fn from_jobs(jobs: &[CompletedJob]) -> CoreResult<Self> {
        let mut summary = CommissionSummary::default();

        for job in jobs {
            let commission = job
                .commission_cost()
                .map_err(|source| invalid_amount(job, "Komisyon", source))?;
            let transport = job
                .transportation_cost()
                .map_err(|source| invalid_amount(job, "Nakliye ücreti", source))?;

            if job.commission_paid {
                summary.paid = add(summary.paid, commission)?;
            } else {
                summary.unpaid = add(summary.unpaid, commission)?;
                summary.unpaid_job_count += 1;
            }
            summary.total = add(summary.total, commission)?;
            summary.transport_revenue = add(summary.transport_revenue, transport)?;
            summary.job_count += 1;
        }

        Ok(summary)
    }
}

fn add(a: Money, b: Money) -> CoreResult<Money> {
    a.checked_add(b).ok_or(CoreError::AmountOverflow)
}

fn invalid_amount(job: &CompletedJob, field: &str, source: ValidationError) -> CoreError {
    CoreError::InvalidAmount {
        job_id: job.id.clone(),
        field: field.to_string(),
        source,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
