//! # State Module
//!
//! Application and screen state.
//!
//! Each concern is its own type, so a command declares exactly the state it
//! needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  App-wide (one each, built by AppContext::bootstrap)                    │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │   DbState    │  │ SessionState │  │    AppConfig     │              │
//! │  │  Database    │  │ Arc<RwLock<  │  │  debounce_ms     │              │
//! │  │  (SQLite     │  │  Option<User>│  │  allow_past_dates│              │
//! │  │   pool)      │  │ >>           │  │  database path   │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  Per screen (owned by the screen, never shared across screens)          │
//! │  ┌──────────────────────┐  ┌──────────────────────┐                    │
//! │  │   SearchHandle<T>    │  │    DeleteState<T>    │                    │
//! │  │  raw → debounced     │  │  Idle / Confirming / │                    │
//! │  │  query, results      │  │  Deleting            │                    │
//! │  └──────────────────────┘  └──────────────────────┘                    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DbState: pool is internally synchronized                            │
//! │  • SessionState, DeleteState: short std lock sections, never awaited   │
//! │  • SearchHandle: state owned by one task, reached through channels     │
//! │  • AppConfig: read-only after startup                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod delete;
mod search;
mod session;

pub use config::{AccountSettings, AppConfig, DatabaseSettings, JobSettings, SearchSettings};
pub use db::DbState;
pub use delete::{DeleteConfirm, DeletePhase, DeleteState};
pub use search::{FilterFn, SearchDebouncer, SearchHandle, SearchSnapshot};
pub use session::SessionState;
