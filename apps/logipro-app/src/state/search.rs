//! # Debounced Search
//!
//! Separates per-keystroke query input from filter execution.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Debounced Search                                  │
//! │                                                                         │
//! │  keystroke ──► set_query("a")   raw = "a"      deadline = t+300ms       │
//! │  keystroke ──► set_query("an")  raw = "an"     deadline = t'+300ms      │
//! │  keystroke ──► set_query("ank") raw = "ank"    deadline = t''+300ms     │
//! │                                                     │                   │
//! │                      300ms of silence ──────────────┘                   │
//! │                                                     ▼                   │
//! │                                         committed = "ank"               │
//! │                                         filter(items, "ank")  (once)    │
//! │                                                     │                   │
//! │                                                     ▼                   │
//! │                                  watch::Sender<SearchSnapshot<T>>       │
//! │                                                     │                   │
//! │                                                     ▼                   │
//! │                                      screen re-renders results          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recomputation Rules
//! | Event                     | Filter runs?                              |
//! |---------------------------|-------------------------------------------|
//! | deadline, query changed   | yes                                       |
//! | deadline, query unchanged | no                                        |
//! | `set_filter`              | no (next committed change uses it)        |
//! | `set_items`               | yes, once, with the committed query       |
//!
//! One task owns the items, the filter and the timer, so filter runs never
//! overlap. Dropping every handle or calling [`SearchHandle::shutdown`]
//! stops the task and discards any pending deadline.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use crate::error::ApiError;

// =============================================================================
// Types
// =============================================================================

/// A filter over a borrowed list, returning borrowed matches.
pub type FilterFn<T> = Arc<dyn for<'a> Fn(&'a [T], &str) -> Vec<&'a T> + Send + Sync>;

/// What the screen renders: the committed query and its matches.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSnapshot<T> {
    pub query: String,
    pub results: Vec<T>,
}

enum SearchCommand<T> {
    SetQuery(String),
    SetFilter(FilterFn<T>),
    SetItems(Vec<T>),
    Shutdown,
}

// =============================================================================
// Handle
// =============================================================================

/// Cloneable handle to a running [`SearchDebouncer`].
pub struct SearchHandle<T> {
    raw_query: Arc<watch::Sender<String>>,
    snapshot_rx: watch::Receiver<SearchSnapshot<T>>,
    cmd_tx: mpsc::Sender<SearchCommand<T>>,
}

impl<T> Clone for SearchHandle<T> {
    fn clone(&self) -> Self {
        SearchHandle {
            raw_query: self.raw_query.clone(),
            snapshot_rx: self.snapshot_rx.clone(),
            cmd_tx: self.cmd_tx.clone(),
        }
    }
}

impl<T> fmt::Debug for SearchHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchHandle")
            .field("raw_query", &*self.raw_query.borrow())
            .finish()
    }
}

impl<T: Clone + Send + Sync + 'static> SearchHandle<T> {
    async fn send(&self, cmd: SearchCommand<T>) -> Result<(), ApiError> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| ApiError::internal("Search task has stopped"))
    }

    /// Records a keystroke. The raw query updates immediately; the filter
    /// runs after the configured quiet period.
    pub async fn set_query(&self, query: impl Into<String>) -> Result<(), ApiError> {
        let query = query.into();
        self.raw_query.send_replace(query.clone());
        self.send(SearchCommand::SetQuery(query)).await
    }

    /// Replaces the filter without re-running it.
    pub async fn set_filter<F>(&self, filter: F) -> Result<(), ApiError>
    where
        F: for<'a> Fn(&'a [T], &str) -> Vec<&'a T> + Send + Sync + 'static,
    {
        self.send(SearchCommand::SetFilter(Arc::new(filter))).await
    }

    /// Replaces the list being searched and re-applies the committed query.
    pub async fn set_items(&self, items: Vec<T>) -> Result<(), ApiError> {
        self.send(SearchCommand::SetItems(items)).await
    }

    /// Stops the task. Pending deadlines are dropped.
    pub async fn shutdown(&self) -> Result<(), ApiError> {
        self.send(SearchCommand::Shutdown).await
    }

    /// The text as typed so far.
    pub fn raw_query(&self) -> String {
        self.raw_query.borrow().clone()
    }

    /// The query the current results were computed for.
    pub fn debounced_query(&self) -> String {
        self.snapshot_rx.borrow().query.clone()
    }

    pub fn results(&self) -> Vec<T> {
        self.snapshot_rx.borrow().results.clone()
    }

    pub fn snapshot(&self) -> SearchSnapshot<T> {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot<T>> {
        self.snapshot_rx.clone()
    }
}

// =============================================================================
// Service
// =============================================================================

/// The task that owns the list, filter and debounce timer.
pub struct SearchDebouncer<T> {
    items: Vec<T>,
    filter: FilterFn<T>,
    delay: Duration,
    committed: String,
    snapshot_tx: watch::Sender<SearchSnapshot<T>>,
}

impl<T: Clone + Send + Sync + 'static> SearchDebouncer<T> {
    /// Creates a debouncer over `items`.
    ///
    /// ## Example
    /// ```rust,ignore
    /// use logipro_core::search::search_carriers;
    ///
    /// let handle = SearchDebouncer::new(carriers, config.debounce_delay(), search_carriers).start();
    /// handle.set_query("ahmet").await?;
    /// ```
    pub fn new<F>(items: Vec<T>, delay: Duration, filter: F) -> Self
    where
        F: for<'a> Fn(&'a [T], &str) -> Vec<&'a T> + Send + Sync + 'static,
    {
        let (snapshot_tx, _) = watch::channel(SearchSnapshot {
            query: String::new(),
            results: Vec::new(),
        });

        SearchDebouncer {
            items,
            filter: Arc::new(filter),
            delay,
            committed: String::new(),
            snapshot_tx,
        }
    }

    /// Runs the filter for the empty query, spawns the task and returns a
    /// handle. Must be called inside a tokio runtime.
    pub fn start(self) -> SearchHandle<T> {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let (raw_tx, _) = watch::channel(String::new());

        self.publish();
        let snapshot_rx = self.snapshot_tx.subscribe();

        tokio::spawn(async move {
            self.run(cmd_rx).await;
        });

        SearchHandle {
            raw_query: Arc::new(raw_tx),
            snapshot_rx,
            cmd_tx,
        }
    }

    async fn run(mut self, mut cmd_rx: mpsc::Receiver<SearchCommand<T>>) {
        debug!(delay_ms = self.delay.as_millis() as u64, "Search debouncer started");

        let mut pending: Option<(String, Instant)> = None;

        loop {
            let deadline = pending.as_ref().map(|(_, at)| *at);

            tokio::select! {
                cmd = cmd_rx.recv() => match cmd {
                    Some(SearchCommand::SetQuery(query)) => {
                        pending = Some((query, Instant::now() + self.delay));
                    }
                    Some(SearchCommand::SetFilter(filter)) => {
                        self.filter = filter;
                    }
                    Some(SearchCommand::SetItems(items)) => {
                        self.items = items;
                        self.publish();
                    }
                    Some(SearchCommand::Shutdown) | None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some((query, _)) = pending.take() {
                        self.commit(query);
                    }
                }
            }
        }

        info!(dropped_pending = pending.is_some(), "Search debouncer stopped");
    }

    fn commit(&mut self, query: String) {
        if query == self.committed {
            debug!("Committed query unchanged, filter skipped");
            return;
        }

        self.committed = query;
        self.publish();
    }

    fn publish(&self) {
        let results: Vec<T> = (self.filter)(&self.items, &self.committed)
            .into_iter()
            .cloned()
            .collect();

        debug!(
            query = %self.committed,
            matches = results.len(),
            total = self.items.len(),
            "Search results updated"
        );

        self.snapshot_tx.send_replace(SearchSnapshot {
            query: self.committed.clone(),
            results,
        });
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;

    fn cities() -> Vec<String> {
        ["Ankara", "Antalya", "İzmir", "Bursa"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn counting_debouncer(delay_ms: u64) -> (SearchDebouncer<String>, Arc<AtomicUsize>) {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();

        let debouncer = SearchDebouncer::new(
            cities(),
            Duration::from_millis(delay_ms),
            move |items: &[String], query: &str| {
                counter.fetch_add(1, Ordering::SeqCst);
                let needle = query.to_lowercase();
                items
                    .iter()
                    .filter(|s| s.to_lowercase().contains(&needle))
                    .collect()
            },
        );

        (debouncer, runs)
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_snapshot_lists_everything() {
        let (debouncer, runs) = counting_debouncer(300);
        let handle = debouncer.start();

        assert_eq!(handle.results().len(), 4);
        assert_eq!(handle.debounced_query(), "");
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_queries_run_filter_once_for_last() {
        let (debouncer, runs) = counting_debouncer(300);
        let handle = debouncer.start();

        for q in ["a", "an", "ant"] {
            handle.set_query(q).await.unwrap();
            sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(handle.raw_query(), "ant");

        // 100ms after the last keystroke: nothing committed yet.
        assert_eq!(handle.debounced_query(), "");
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        sleep(Duration::from_millis(201)).await;

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.query, "ant");
        assert_eq!(snapshot.results, vec!["Antalya".to_string()]);
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_committed_query_does_not_rerun() {
        let (debouncer, runs) = counting_debouncer(300);
        let handle = debouncer.start();

        handle.set_query("bur").await.unwrap();
        sleep(Duration::from_millis(301)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);

        // Typed and erased back to the same text.
        handle.set_query("burs").await.unwrap();
        handle.set_query("bur").await.unwrap();
        sleep(Duration::from_millis(301)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);
        assert_eq!(handle.results(), vec!["Bursa".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_filter_does_not_rerun() {
        let (debouncer, runs) = counting_debouncer(300);
        let handle = debouncer.start();

        handle
            .set_filter(|items: &[String], _query: &str| items.iter().take(1).collect())
            .await
            .unwrap();
        sleep(Duration::from_millis(10)).await;

        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(handle.results().len(), 4);

        handle.set_query("x").await.unwrap();
        sleep(Duration::from_millis(301)).await;
        assert_eq!(handle.results(), vec!["Ankara".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_items_reapplies_committed_query() {
        let (debouncer, runs) = counting_debouncer(300);
        let handle = debouncer.start();

        handle.set_query("an").await.unwrap();
        sleep(Duration::from_millis(301)).await;
        assert_eq!(handle.results().len(), 2);

        handle
            .set_items(vec!["Adana".to_string(), "Manisa".to_string(), "Rize".to_string()])
            .await
            .unwrap();
        sleep(Duration::from_millis(1)).await;

        assert_eq!(handle.results(), vec!["Adana".to_string(), "Manisa".to_string()]);
        assert_eq!(runs.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_drops_pending_query() {
        let (debouncer, runs) = counting_debouncer(300);
        let handle = debouncer.start();

        handle.set_query("izm").await.unwrap();
        handle.shutdown().await.unwrap();
        sleep(Duration::from_millis(500)).await;

        assert_eq!(handle.debounced_query(), "");
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(handle.set_query("x").await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribe_notifies_on_commit() {
        let (debouncer, _) = counting_debouncer(50);
        let handle = debouncer.start();
        let mut rx = handle.subscribe();

        handle.set_query("ank").await.unwrap();
        rx.changed().await.unwrap();

        assert_eq!(rx.borrow().query, "ank");
        assert_eq!(rx.borrow().results, vec!["Ankara".to_string()]);
    }
}
