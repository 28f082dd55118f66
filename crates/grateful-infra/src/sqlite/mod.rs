//! SQLite storage layer.
//!
//! A JSON document store backed by SQLite with WAL mode and split read/write
//! connection pools.

pub mod document;
pub mod pool;
