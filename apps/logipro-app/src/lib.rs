//! # LogisticsPRO Application Library
//!
//! Application layer of the LogisticsPRO broker tool: configuration,
//! database and session state, screen state (debounced search and delete
//! confirmation) and the commands screens call.
//!
//! ## Module Organization
//! ```text
//! logipro_app/
//! ├── lib.rs          ◄─── You are here (logging, AppContext)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── logipro.toml + LOGIPRO_* overrides
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── session.rs  ◄─── Signed-in user
//! │   ├── search.rs   ◄─── Debounced search task
//! │   └── delete.rs   ◄─── Delete confirmation state machine
//! ├── commands/
//! │   ├── mod.rs      ◄─── Shared collection helpers
//! │   ├── auth.rs     ◄─── Accounts
//! │   ├── carrier.rs  ◄─── Carriers
//! │   ├── company.rs  ◄─── Companies
//! │   ├── job.rs      ◄─── Planned/completed jobs, commissions
//! │   ├── availability.rs
//! │   └── iban.rs
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use logipro_core::search::{filter_by_query, Searchable};
use logipro_core::Identifiable;
use logipro_store::{Database, DbConfig};

use error::ApiError;
use state::{AppConfig, DbState, DeleteState, SearchDebouncer, SearchHandle, SessionState};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=logipro_store=trace` - Trace the store only
/// - Default: INFO, DEBUG for the logipro crates
///
/// Calling it twice is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,logipro=debug,sqlx=warn"));

    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        warn!("Tracing subscriber was already installed");
    }
}

/// App-wide state, built once at startup.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. AppConfig::load_or_default ───────────────────────────────────────► │
/// │     • logipro.toml in the platform config dir                           │
/// │     • LOGIPRO_DB_PATH / LOGIPRO_DEBOUNCE_MS / LOGIPRO_ALLOW_PAST_DATES  │
/// │                                                                         │
/// │  2. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode                                              │
/// │     • Run pending migrations                                            │
/// │                                                                         │
/// │  3. Restore Session ──────────────────────────────────────────────────► │
/// │     • [account] user_id, if that user exists and is approved            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub db: DbState,
    pub session: SessionState,
}

impl AppContext {
    /// Opens the configured database and restores the remembered session.
    pub async fn bootstrap(config: AppConfig) -> Result<Self, ApiError> {
        let db_path = config.database_path()?;
        info!(?db_path, "Database path determined");

        let db_config = DbConfig::new(db_path).max_connections(config.database.max_connections);
        let db = Database::new(db_config).await?;
        info!("Database connected and migrations applied");

        let context = Self::with_database(config, db);
        context.restore_session().await?;
        Ok(context)
    }

    /// Builds the context over an already opened database.
    pub fn with_database(config: AppConfig, db: Database) -> Self {
        AppContext {
            config,
            db: DbState::new(db),
            session: SessionState::new(),
        }
    }

    async fn restore_session(&self) -> Result<(), ApiError> {
        let Some(user_id) = &self.config.account.user_id else {
            return Ok(());
        };

        match self.db.inner().users().get(user_id).await? {
            Some(user) if user.approved => self.session.sign_in(user),
            Some(_) => warn!(%user_id, "Remembered account is not approved"),
            None => warn!(%user_id, "Remembered account no longer exists"),
        }
        Ok(())
    }

    /// Starts a debounced search over `items` with the configured delay.
    pub fn search_screen<T, F>(&self, items: Vec<T>, filter: F) -> SearchHandle<T>
    where
        T: Clone + Send + Sync + 'static,
        F: for<'a> Fn(&'a [T], &str) -> Vec<&'a T> + Send + Sync + 'static,
    {
        SearchDebouncer::new(items, self.config.debounce_delay(), filter).start()
    }

    /// Default search over a collection's own search fields.
    pub fn default_search_screen<T>(&self, items: Vec<T>) -> SearchHandle<T>
    where
        T: Searchable + Clone + Send + Sync + 'static,
    {
        self.search_screen(items, filter_by_query::<T>)
    }

    /// Fresh delete confirmation for one list screen.
    pub fn delete_state<T: Identifiable + Clone>(&self) -> DeleteState<T> {
        DeleteState::new()
    }

    pub async fn shutdown(&self) {
        self.db.inner().close().await;
        info!("Database closed");
    }
}
