//! Infrastructure layer for the Grateful bot.
//!
//! Contains the SQLite implementation of the `DocumentStore` trait defined in
//! `grateful-core`, plus data-directory resolution and configuration loading.

pub mod config;
pub mod sqlite;
