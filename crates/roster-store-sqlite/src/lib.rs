//! SQLite backend for the roster recruitment store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Free-text search is served by an FTS5
//! table the store maintains alongside the `candidates` rows.

mod encode;
mod filter;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
