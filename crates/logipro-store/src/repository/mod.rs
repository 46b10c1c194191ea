//! # Repository Module
//!
//! Data-access repositories for LogisticsPRO.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Command (create_carrier)                                              │
//! │       │                                                                 │
//! │       │  db.collection::<Carrier>(uid).insert(carrier)                 │
//! │       ▼                                                                 │
//! │  Collection<T>         typed: T ⇄ JSON, id generation                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DocumentRepository    raw: get / set / update / remove / list         │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite `documents` table                                              │
//! │                                                                         │
//! │  UserRepository        accounts in the `users` table                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`DocumentRepository`](document::DocumentRepository) - JSON document tree
//! - [`Collection`](collection::Collection) - Typed entity collections
//! - [`UserRepository`](user::UserRepository) - Accounts and password hashes

pub mod collection;
pub mod document;
pub mod user;
