//! # Delete Confirmation
//!
//! One controller for "pick a row → confirm → delete → reconcile" on every
//! list screen (carriers, companies, jobs, IBANs).
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            open(item)                  begin()                          │
//! │   ┌──────┐ ─────────► ┌────────────┐ ──────────► ┌──────────┐           │
//! │   │ Idle │            │ Confirming │             │ Deleting │           │
//! │   └──────┘ ◄───────── └────────────┘ ◄────────── └──────────┘           │
//! │      ▲       close()        ▲         finish(false)    │                │
//! │      │                      │         (item kept)      │                │
//! │      └──────────────────────┴──────────────────────────┘                │
//! │                              finish(true) / close()                     │
//! │                                                                         │
//! │   is_open     = Confirming | Deleting                                   │
//! │   is_deleting = Deleting                                                │
//! │   open/begin are ignored while Deleting; close always goes to Idle      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`DeleteConfirm`] is the plain state machine; [`DeleteState`] shares it
//! between the screen and the async delete call.
//!
//! A delete that never reports back (its future dropped, or the callback
//! panicked) counts as a failure: the dialog returns to Confirming.

use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

use logipro_core::Identifiable;

// =============================================================================
// Phase
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DeletePhase {
    #[default]
    Idle,
    Confirming,
    Deleting,
}

// =============================================================================
// State Machine
// =============================================================================

/// Confirmation dialog state for items of type `T`.
#[derive(Debug, Clone)]
pub struct DeleteConfirm<T> {
    phase: DeletePhase,
    item: Option<T>,
    /// Bumped by every `begin`, so a late result only settles its own run.
    run: u64,
}

impl<T> Default for DeleteConfirm<T> {
    fn default() -> Self {
        DeleteConfirm {
            phase: DeletePhase::Idle,
            item: None,
            run: 0,
        }
    }
}

impl<T: Identifiable + Clone> DeleteConfirm<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DeletePhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != DeletePhase::Idle
    }

    pub fn is_deleting(&self) -> bool {
        self.phase == DeletePhase::Deleting
    }

    pub fn item(&self) -> Option<&T> {
        self.item.as_ref()
    }

    /// Shows the dialog for `item`, replacing any previous target.
    pub fn open(&mut self, item: T, entity_type: &str) {
        if self.is_deleting() {
            warn!(entity_type, "Delete in progress, open ignored");
            return;
        }

        info!(entity_type, id = %item.id(), "Delete confirmation opened");
        self.item = Some(item);
        self.phase = DeletePhase::Confirming;
    }

    /// Cancels the dialog from any phase. A delete still running settles
    /// nothing when it returns.
    pub fn close(&mut self) {
        if self.is_deleting() {
            debug!("Dialog closed while a delete is running");
        }

        self.item = None;
        self.phase = DeletePhase::Idle;
    }

    /// Confirming → Deleting. Returns the target, or `None` when there is
    /// nothing to confirm or a delete is already running.
    pub fn begin(&mut self) -> Option<T> {
        if self.phase != DeletePhase::Confirming {
            return None;
        }

        let item = self.item.clone()?;
        self.phase = DeletePhase::Deleting;
        self.run += 1;
        Some(item)
    }

    /// Deleting → Idle on success, back to Confirming with the same item on
    /// failure. Does nothing outside Deleting.
    pub fn finish(&mut self, success: bool) {
        self.finish_run(self.run, success);
    }

    fn finish_run(&mut self, run: u64, success: bool) {
        if !self.is_deleting() || run != self.run {
            return;
        }

        if success {
            self.item = None;
            self.phase = DeletePhase::Idle;
        } else {
            self.phase = DeletePhase::Confirming;
        }
    }
}

// =============================================================================
// Shared State
// =============================================================================

/// Shared delete-confirmation state for one screen.
///
/// Uses a std `Mutex`: every critical section is a few field writes and the
/// lock is released before the delete call is awaited.
#[derive(Debug)]
pub struct DeleteState<T> {
    inner: Arc<Mutex<DeleteConfirm<T>>>,
}

impl<T> Clone for DeleteState<T> {
    fn clone(&self) -> Self {
        DeleteState {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Identifiable + Clone> Default for DeleteState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identifiable + Clone> DeleteState<T> {
    pub fn new() -> Self {
        DeleteState {
            inner: Arc::new(Mutex::new(DeleteConfirm::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DeleteConfirm<T>> {
        // The state stays consistent even if a holder panicked.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn open(&self, item: T, entity_type: &str) {
        self.lock().open(item, entity_type);
    }

    pub fn close(&self) {
        self.lock().close();
    }

    pub fn phase(&self) -> DeletePhase {
        self.lock().phase()
    }

    pub fn is_open(&self) -> bool {
        self.lock().is_open()
    }

    pub fn is_deleting(&self) -> bool {
        self.lock().is_deleting()
    }

    pub fn item(&self) -> Option<T> {
        self.lock().item().cloned()
    }

    /// Runs `callback` on the confirmed item.
    ///
    /// `Ok(true)` closes the dialog and returns `true`. `Ok(false)` or an
    /// error returns to Confirming with the item kept, and returns `false`.
    /// Called with nothing to confirm, or while another delete is running,
    /// it does nothing and returns `false`.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let deleted = screen.delete
    ///     .confirm_delete("carrier", |c| async move {
    ///         commands::carrier::delete_carrier(&db, &session, &c.id).await
    ///     })
    ///     .await;
    /// ```
    pub async fn confirm_delete<F, Fut, E>(&self, entity_type: &str, callback: F) -> bool
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<bool, E>>,
        E: Display,
    {
        let (item, run) = {
            let mut state = self.lock();
            match state.begin() {
                Some(item) => (item, state.run),
                None => {
                    debug!(entity_type, "Nothing to delete or delete already running");
                    return false;
                }
            }
        };

        let id = item.id().to_string();
        debug!(entity_type, %id, "Deleting");
        let mut in_flight = InFlight {
            state: self,
            run,
            armed: true,
        };

        let success = match callback(item).await {
            Ok(true) => {
                info!(entity_type, %id, "Deleted");
                true
            }
            Ok(false) => {
                warn!(entity_type, %id, "Delete reported failure");
                false
            }
            Err(e) => {
                error!(entity_type, %id, error = %e, "Delete failed");
                false
            }
        };

        in_flight.armed = false;
        self.lock().finish_run(run, success);
        success
    }
}

/// Settles an unfinished delete as failed when `confirm_delete` is dropped
/// or unwinds before the callback returns.
struct InFlight<'a, T: Identifiable + Clone> {
    state: &'a DeleteState<T>,
    run: u64,
    armed: bool,
}

impl<T: Identifiable + Clone> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            warn!("Delete interrupted before completion");
            self.state.lock().finish_run(self.run, false);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
