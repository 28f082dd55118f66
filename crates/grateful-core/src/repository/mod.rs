//! Repository trait definitions (ports) and their document-store adapters.
//!
//! The gratitude and user repositories are what the services talk to. The
//! only implementations shipped here sit on top of any
//! [`DocumentStore`](crate::storage::document_store::DocumentStore), so the
//! core crate never depends on a specific storage technology.

pub mod document;
pub mod gratitude;
pub mod user;
