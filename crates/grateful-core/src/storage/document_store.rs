//! Document store trait.
//!
//! Implementations live in grateful-infra (SQLite) and in
//! [`super::memory`] (process-local).

use grateful_types::error::RepositoryError;
use serde_json::Value;

/// A stored document together with the id the store assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub body: Value,
}

/// Equality filter on a single top-level field.
#[derive(Debug, Clone)]
pub struct DocumentQuery {
    pub field: String,
    pub equals: Value,
    pub limit: Option<u32>,
}

impl DocumentQuery {
    pub fn field_equals(field: impl Into<String>, equals: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            equals: equals.into(),
            limit: None,
        }
    }

    pub fn limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }
}

/// Trait for a collection-oriented JSON document store.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait DocumentStore: Send + Sync {
    /// Insert a new document and return the id the store generated for it.
    ///
    /// Each call creates a new document; inserts are never deduplicated.
    fn insert(
        &self,
        collection: &str,
        document: &Value,
    ) -> impl std::future::Future<Output = Result<String, RepositoryError>> + Send;

    /// Write a document under a caller-chosen id (upsert).
    fn put(
        &self,
        collection: &str,
        id: &str,
        document: &Value,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Fetch a document by id. Returns None if it does not exist.
    fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Value>, RepositoryError>> + Send;

    /// Find documents matching the query, most recently inserted first.
    fn find(
        &self,
        collection: &str,
        query: &DocumentQuery,
    ) -> impl std::future::Future<Output = Result<Vec<Document>, RepositoryError>> + Send;

    /// Number of documents in a collection.
    fn count(
        &self,
        collection: &str,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
