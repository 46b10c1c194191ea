//! # Database Handle
//!
//! Opens the SQLite file that holds every user's document tree and the
//! account table, and hands out repositories over the shared pool.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AppContext::bootstrap                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new("…/logipro.db").max_connections(n)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config) ──► SqlitePool (WAL) ──► migrations              │
//! │       │                                                                 │
//! │       ├── collection::<Carrier>(uid) ──► users/{uid}/data/carriers/…    │
//! │       ├── collection::<PlannedJob>(uid)                                 │
//! │       ├── documents()   (untyped JSON tree)                             │
//! │       └── users()       (accounts)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! File databases use WAL so a list screen can read while a save commits.
//! A writer that finds the file locked waits up to [`DbConfig::busy_timeout`]
//! before the store reports a failure.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use logipro_core::Document;

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::collection::Collection;
use crate::repository::document::DocumentRepository;
use crate::repository::user::UserRepository;

const MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Where the store lives and how many connections it may open.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_path: PathBuf,
    /// Default 5. In-memory stores always use 1: every connection to
    /// `:memory:` would see its own empty database.
    pub max_connections: u32,
    /// How long to wait for a pooled connection. Default 30 s.
    pub acquire_timeout: Duration,
    /// How long a write waits on a locked file. Default 5 s.
    pub busy_timeout: Duration,
    /// Apply pending migrations on open. Default true.
    pub run_migrations: bool,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Fresh, empty database. Lives as long as the pool.
    pub fn in_memory() -> Self {
        DbConfig {
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            ..DbConfig::new(MEMORY_PATH)
        }
    }

    /// Values below 1 are raised to 1.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    fn is_memory(&self) -> bool {
        is_memory_path(&self.database_path)
    }

    fn connect_options(&self) -> SqliteConnectOptions {
        let options = if self.is_memory() {
            SqliteConnectOptions::new().in_memory(true)
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
        };

        options
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(self.busy_timeout)
    }
}

// =============================================================================
// Database
// =============================================================================

/// Shared handle to the store. Clones share one pool.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("./logipro.db")).await?;
/// let carriers = db.collection::<Carrier>(&uid).list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (creating if needed) the database and applies migrations.
    ///
    /// ## Errors
    /// - [`DbError::ConnectionFailed`] if the file cannot be opened
    /// - [`DbError::MigrationFailed`] if the schema cannot be brought up to date
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        let max_connections = if config.is_memory() { 1 } else { config.max_connections };
        info!(path = %config.database_path.display(), max_connections, "Opening document store");

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(config.acquire_timeout);
        if config.is_memory() {
            // dropping the only connection would drop the data
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(config.connect_options())
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
        debug!("Pool ready");

        let db = Database { pool };
        if config.run_migrations {
            db.run_migrations().await?;
        }
        Ok(db)
    }

    /// Applies pending migrations. Already applied ones are skipped.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Untyped access to the JSON document tree.
    pub fn documents(&self) -> DocumentRepository {
        DocumentRepository::new(self.pool.clone())
    }

    /// Typed view of `users/{uid}/data/{T::COLLECTION}`.
    pub fn collection<T: Document>(&self, user_id: impl Into<String>) -> Collection<T> {
        Collection::new(self.documents(), user_id)
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    /// Later operations fail with [`DbError::ConnectionFailed`].
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Document store closed");
    }

    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

/// True when `path` names the in-memory store rather than a file.
pub fn is_memory_path(path: &Path) -> bool {
    path.as_os_str() == MEMORY_PATH
}

// =============================================================================
// Unit Tests
// =============================================================================
