//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite table:
//! - analyses(id, text, label, compound, neg, neu, pos, timestamp)
//!
//! The table is append-only. Every operation opens its own connection.

pub mod schema;
pub mod sqlite;

pub use sqlite::{SqliteStore, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};
