use std::time::Duration;

use thiserror::Error;

/// Errors from repository and document-store operations.
///
/// Callers only need to know whether retrying could help; see
/// [`RepositoryError::is_retryable`].
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage unreachable: {0}")]
    Connection(String),

    #[error("storage call timed out after {0:?}")]
    Timeout(Duration),

    #[error("query error: {0}")]
    Query(String),

    #[error("write rejected: {0}")]
    Rejected(String),

    #[error("entity not found")]
    NotFound,
}

impl RepositoryError {
    /// Whether the same call might succeed if attempted again later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout(_))
    }
}

/// Errors surfaced by the gratitude flow.
#[derive(Debug, Error)]
pub enum GratitudeError {
    #[error("gratitude text is empty")]
    Empty,

    #[error("failed to persist gratitude entry: {0}")]
    PersistenceFailed(#[source] RepositoryError),
}

/// Errors raised while assembling the runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
