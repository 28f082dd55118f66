//! Gratitude service: turns a user's answer into a stored entry and a reply.

use std::time::Duration;

use grateful_types::error::{GratitudeError, RepositoryError};
use grateful_types::gratitude::{GratitudeEntry, GratitudeRecord, UserId};
use tracing::{debug, info, warn};

use super::{DEFAULT_STORAGE_TIMEOUT, with_timeout};
use crate::replies;
use crate::repository::gratitude::GratitudeRepository;

/// Builds gratitude entries, persists them, and produces the reply text.
///
/// Generic over `GratitudeRepository` so grateful-core never depends on a
/// concrete store. Every repository call is bounded by `storage_timeout`.
pub struct GratitudeService<R: GratitudeRepository> {
    repo: R,
    storage_timeout: Duration,
}

impl<R: GratitudeRepository> GratitudeService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    pub fn with_storage_timeout(mut self, timeout: Duration) -> Self {
        self.storage_timeout = timeout;
        self
    }

    /// Access the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Store `raw_text` as a gratitude entry for `user_id`.
    ///
    /// Blank input fails with `GratitudeError::Empty` before the repository is
    /// touched. On success the fixed thank-you reply is returned. Storage
    /// failures (including an expired deadline) become
    /// `GratitudeError::PersistenceFailed`; nothing is retried here.
    pub async fn handle_gratitude(
        &self,
        user_id: &UserId,
        raw_text: &str,
    ) -> Result<String, GratitudeError> {
        let entry = GratitudeEntry::new(user_id.clone(), raw_text)?;
        debug!(user_id = %user_id, text = %entry.text, "Saving gratitude entry");

        match with_timeout(self.storage_timeout, self.repo.save(&entry)).await {
            Ok(entry_id) => {
                info!(user_id = %user_id, entry_id = %entry_id, "Gratitude entry saved");
                Ok(replies::THANK_YOU.to_string())
            }
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    retryable = e.is_retryable(),
                    error = %e,
                    "Failed to save gratitude entry"
                );
                Err(GratitudeError::PersistenceFailed(e))
            }
        }
    }

    /// The user's most recent entries, newest first.
    pub async fn recent_entries(
        &self,
        user_id: &UserId,
        limit: Option<u32>,
    ) -> Result<Vec<GratitudeRecord>, RepositoryError> {
        with_timeout(self.storage_timeout, self.repo.list_by_user(user_id, limit)).await
    }
}
