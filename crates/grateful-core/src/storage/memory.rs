//! Process-local document store.
//!
//! Useful for tests and for running the bot without a database. Contents are
//! lost when the process exits.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use grateful_types::error::RepositoryError;
use serde_json::Value;
use uuid::Uuid;

use super::document_store::{Document, DocumentQuery, DocumentStore};

type Collections = HashMap<String, Vec<Document>>;

/// In-memory implementation of `DocumentStore`.
///
/// Cloning produces a handle to the same underlying collections. Documents
/// are kept in insertion order per collection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<Mutex<Collections>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>, RepositoryError> {
        self.collections
            .lock()
            .map_err(|e| RepositoryError::Query(format!("document store lock poisoned: {e}")))
    }
}

impl DocumentStore for InMemoryDocumentStore {
    async fn insert(&self, collection: &str, document: &Value) -> Result<String, RepositoryError> {
        let id = Uuid::now_v7().to_string();
        let mut collections = self.lock()?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                body: document.clone(),
            });
        Ok(id)
    }

    async fn put(&self, collection: &str, id: &str, document: &Value) -> Result<(), RepositoryError> {
        let mut collections = self.lock()?;
        let docs = collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|d| d.id == id) {
            Some(existing) => existing.body = document.clone(),
            None => docs.push(Document {
                id: id.to_string(),
                body: document.clone(),
            }),
        }
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, RepositoryError> {
        let collections = self.lock()?;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .map(|d| d.body.clone()))
    }

    async fn find(
        &self,
        collection: &str,
        query: &DocumentQuery,
    ) -> Result<Vec<Document>, RepositoryError> {
        let collections = self.lock()?;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let limit = query.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(docs
            .iter()
            .rev()
            .filter(|d| d.body.get(&query.field) == Some(&query.equals))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self, collection: &str) -> Result<u64, RepositoryError> {
        let collections = self.lock()?;
        Ok(collections.get(collection).map_or(0, |docs| docs.len() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_generates_distinct_ids() {
        let store = InMemoryDocumentStore::new();
        let doc = json!({"text": "same"});
        let a = store.insert("entries", &doc).await.unwrap();
        let b = store.insert("entries", &doc).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.count("entries").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_put_upserts() {
        let store = InMemoryDocumentStore::new();
        store.put("users", "42", &json!({"n": 1})).await.unwrap();
        store.put("users", "42", &json!({"n": 2})).await.unwrap();

        assert_eq!(store.get("users", "42").await.unwrap(), Some(json!({"n": 2})));
        assert_eq!(store.count("users").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = InMemoryDocumentStore::new();
        assert!(store.get("users", "nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_filters_newest_first_with_limit() {
        let store = InMemoryDocumentStore::new();
        for (user, text) in [("1", "a"), ("2", "b"), ("1", "c"), ("1", "d")] {
            store
                .insert("entries", &json!({"user_id": user, "text": text}))
                .await
                .unwrap();
        }

        let query = DocumentQuery::field_equals("user_id", "1").limit(Some(2));
        let found = store.find("entries", &query).await.unwrap();
        let texts: Vec<&str> = found.iter().map(|d| d.body["text"].as_str().unwrap()).collect();
        assert_eq!(texts, vec!["d", "c"]);
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let store = InMemoryDocumentStore::new();
        let other = store.clone();
        store.insert("entries", &json!({})).await.unwrap();
        assert_eq!(other.count("entries").await.unwrap(), 1);
    }
}
