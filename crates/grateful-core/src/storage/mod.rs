//! Document-store abstraction.
//!
//! The persistence boundary of the bot: a schemaless store of JSON documents
//! grouped into named collections. Repositories in `crate::repository` are
//! built on top of it.

pub mod document_store;
pub mod memory;
