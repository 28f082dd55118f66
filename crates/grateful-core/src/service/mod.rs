//! Business logic services (use cases).
//!
//! Services orchestrate repository calls and business rules. They depend on
//! traits (ports), never on concrete infrastructure implementations.

pub mod gratitude;
pub mod user;

use std::future::Future;
use std::time::Duration;

use grateful_types::error::RepositoryError;

/// Storage deadline used when none is configured.
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Run a repository call, giving up after `limit`.
///
/// An expired deadline is reported as `RepositoryError::Timeout`; the
/// pending call is dropped.
pub(crate) async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, RepositoryError>
where
    F: Future<Output = Result<T, RepositoryError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(RepositoryError::Timeout(limit)),
    }
}
