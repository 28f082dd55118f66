//! Repository implementations backed by a `DocumentStore`.
//!
//! Entries and users are serialized to JSON with serde and written to the
//! `gratitude_entries` and `users` collections respectively.

use grateful_types::error::RepositoryError;
use grateful_types::gratitude::{EntryId, GratitudeEntry, GratitudeRecord, UserId};
use grateful_types::user::User;
use tracing::debug;

use crate::repository::gratitude::GratitudeRepository;
use crate::repository::user::UserRepository;
use crate::storage::document_store::{DocumentQuery, DocumentStore};

/// Collection holding one document per gratitude entry.
pub const GRATITUDE_COLLECTION: &str = "gratitude_entries";

/// Collection holding one document per user, keyed by user id.
pub const USER_COLLECTION: &str = "users";

fn encode<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, RepositoryError> {
    serde_json::to_value(value)
        .map_err(|e| RepositoryError::Query(format!("failed to serialize document: {e}")))
}

fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T, RepositoryError> {
    serde_json::from_value(value)
        .map_err(|e| RepositoryError::Query(format!("invalid document: {e}")))
}

/// `GratitudeRepository` over any `DocumentStore`.
pub struct DocumentGratitudeRepository<D: DocumentStore> {
    store: D,
}

impl<D: DocumentStore> DocumentGratitudeRepository<D> {
    pub fn new(store: D) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &D {
        &self.store
    }
}

impl<D: DocumentStore> GratitudeRepository for DocumentGratitudeRepository<D> {
    async fn save(&self, entry: &GratitudeEntry) -> Result<EntryId, RepositoryError> {
        if entry.text.trim().is_empty() {
            return Err(RepositoryError::Rejected(
                "gratitude text must not be empty".to_string(),
            ));
        }

        let document = encode(entry)?;
        let id = self.store.insert(GRATITUDE_COLLECTION, &document).await?;
        debug!(entry_id = %id, user_id = %entry.user_id, "Inserted gratitude document");
        Ok(EntryId(id))
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        limit: Option<u32>,
    ) -> Result<Vec<GratitudeRecord>, RepositoryError> {
        let query = DocumentQuery::field_equals("user_id", user_id.as_str()).limit(limit);
        let documents = self.store.find(GRATITUDE_COLLECTION, &query).await?;

        documents
            .into_iter()
            .map(|doc| {
                let entry: GratitudeEntry = decode(doc.body)?;
                Ok(GratitudeRecord::from_entry(EntryId(doc.id), entry))
            })
            .collect()
    }
}

/// `UserRepository` over any `DocumentStore`. Users are keyed by their
/// platform id, so registering twice overwrites rather than duplicates.
pub struct DocumentUserRepository<D: DocumentStore> {
    store: D,
}

impl<D: DocumentStore> DocumentUserRepository<D> {
    pub fn new(store: D) -> Self {
        Self { store }
    }
}

impl<D: DocumentStore> UserRepository for DocumentUserRepository<D> {
    async fn get(&self, user_id: &UserId) -> Result<Option<User>, RepositoryError> {
        match self.store.get(USER_COLLECTION, user_id.as_str()).await? {
            Some(body) => Ok(Some(decode(body)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        let document = encode(user)?;
        self.store
            .put(USER_COLLECTION, user.user_id.as_str(), &document)
            .await
    }

    async fn list_reminder_subscribers(&self) -> Result<Vec<User>, RepositoryError> {
        let query = DocumentQuery::field_equals("reminder_enabled", true);
        let documents = self.store.find(USER_COLLECTION, &query).await?;
        documents.into_iter().map(|doc| decode(doc.body)).collect()
    }
}
