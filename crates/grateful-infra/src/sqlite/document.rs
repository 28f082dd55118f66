//! SQLite document store implementation.
//!
//! Implements `DocumentStore` from `grateful-core` over a single `documents`
//! table. Bodies are stored as JSON text and filtered with `json_extract`.

use chrono::Utc;
use grateful_core::storage::document_store::{Document, DocumentQuery, DocumentStore};
use grateful_types::error::RepositoryError;
use serde_json::Value;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `DocumentStore`.
#[derive(Clone)]
pub struct SqliteDocumentStore {
    pool: DatabasePool,
}

impl SqliteDocumentStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Pool exhaustion and IO problems may clear up on their own; anything else
/// is a query problem.
fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection(err.to_string())
        }
        other => RepositoryError::Query(other.to_string()),
    }
}

fn to_json_text(document: &Value) -> Result<String, RepositoryError> {
    serde_json::to_string(document)
        .map_err(|e| RepositoryError::Query(format!("failed to serialize document: {e}")))
}

fn parse_body(body: &str) -> Result<Value, RepositoryError> {
    serde_json::from_str(body).map_err(|e| RepositoryError::Query(format!("invalid JSON body: {e}")))
}

/// Only plain field names are accepted; they are spliced into a JSON path.
fn json_path(field: &str) -> Result<String, RepositoryError> {
    let valid = !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(RepositoryError::Query(format!("unsupported field name: {field}")));
    }
    Ok(format!("$.{field}"))
}

// ---------------------------------------------------------------------------
// DocumentStore implementation
// ---------------------------------------------------------------------------

impl DocumentStore for SqliteDocumentStore {
    async fn insert(&self, collection: &str, document: &Value) -> Result<String, RepositoryError> {
        let id = Uuid::now_v7().to_string();
        let body = to_json_text(document)?;

        sqlx::query(
            "INSERT INTO documents (collection, id, body, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(collection)
        .bind(&id)
        .bind(&body)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx_error)?;

        Ok(id)
    }

    async fn put(&self, collection: &str, id: &str, document: &Value) -> Result<(), RepositoryError> {
        let body = to_json_text(document)?;

        sqlx::query(
            r#"INSERT INTO documents (collection, id, body, created_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (collection, id) DO UPDATE SET body = excluded.body"#,
        )
        .bind(collection)
        .bind(id)
        .bind(&body)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, RepositoryError> {
        let row = sqlx::query("SELECT body FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;

        match row {
            Some(row) => {
                let body: String = row.try_get("body").map_err(map_sqlx_error)?;
                Ok(Some(parse_body(&body)?))
            }
            None => Ok(None),
        }
    }

    async fn find(
        &self,
        collection: &str,
        query: &DocumentQuery,
    ) -> Result<Vec<Document>, RepositoryError> {
        let path = json_path(&query.field)?;
        // Wrapping the needle in a JSON document keeps type-aware comparison:
        // the string "42" does not match the number 42.
        let needle = to_json_text(&serde_json::json!({ "v": query.equals }))?;
        let limit = query.limit.map(i64::from).unwrap_or(-1);

        let rows = sqlx::query(
            r#"SELECT id, body FROM documents
               WHERE collection = ?
                 AND json_extract(body, ?) = json_extract(?, '$.v')
                 AND json_type(body, ?) IS json_type(?, '$.v')
               ORDER BY rowid DESC
               LIMIT ?"#,
        )
        .bind(collection)
        .bind(&path)
        .bind(&needle)
        .bind(&path)
        .bind(&needle)
        .bind(limit)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter()
            .map(|row| {
                let id: String = row.try_get("id").map_err(map_sqlx_error)?;
                let body: String = row.try_get("body").map_err(map_sqlx_error)?;
                Ok(Document {
                    id,
                    body: parse_body(&body)?,
                })
            })
            .collect()
    }

    async fn count(&self, collection: &str) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = ?")
            .bind(collection)
            .fetch_one(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;

        Ok(count.max(0) as u64)
    }
}
