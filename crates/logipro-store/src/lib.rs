//! # logipro-store: Document Store for LogisticsPRO
//!
//! The data-access collaborator behind the screens: a per-user document tree
//! plus broker accounts, persisted in SQLite through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        LogisticsPRO Data Flow                           │
//! │                                                                         │
//! │  Command (create_carrier)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  logipro-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │  │   │
//! │  │   │               │    │ DocumentRepo   │    │ 001_init.sql │  │   │
//! │  │   │ SqlitePool    │◄───│ Collection<T>  │    │              │  │   │
//! │  │   │               │    │ UserRepo       │    │              │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (path from AppConfig)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Store error types
//! - [`repository`] - Documents, typed collections, accounts
//!
//! ## Usage
//!
//! ```rust,ignore
//! use logipro_core::Carrier;
//! use logipro_store::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("logipro.db")).await?;
//!
//! let carriers = db.collection::<Carrier>(&user_id).list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::collection::Collection;
pub use repository::document::{DocumentPath, DocumentRepository};
pub use repository::user::{User, UserRepository};
