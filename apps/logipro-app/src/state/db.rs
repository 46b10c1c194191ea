//! # Database State
//!
//! Wraps the `Database` handle for use in commands.
//!
//! The pool inside `Database` is thread-safe, so commands run queries
//! concurrently without extra locking.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub async fn list_carriers(
//!     db: &DbState,
//!     session: &SessionState,
//! ) -> Result<Vec<Carrier>, ApiError> {
//!     let uid = session.user_id()?;
//!     Ok(db.collection::<Carrier>(uid).list().await?)
//! }
//! ```

use logipro_core::Document;
use logipro_store::{Collection, Database};

/// Wrapper around `Database` shared by every command.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }

    /// Typed collection in the given user's tree.
    pub fn collection<T: Document>(&self, user_id: impl Into<String>) -> Collection<T> {
        self.db.collection(user_id)
    }
}
