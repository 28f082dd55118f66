//! GratitudeRepository trait definition.

use grateful_types::error::RepositoryError;
use grateful_types::gratitude::{EntryId, GratitudeEntry, GratitudeRecord, UserId};

/// Repository trait for gratitude entry persistence.
///
/// Entries are immutable, so there is no update or delete. Uses native async
/// fn in traits (RPITIT, Rust 2024 edition).
pub trait GratitudeRepository: Send + Sync {
    /// Persist a new entry as a single atomic insert.
    ///
    /// Not idempotent: saving the same entry twice stores it twice.
    fn save(
        &self,
        entry: &GratitudeEntry,
    ) -> impl std::future::Future<Output = Result<EntryId, RepositoryError>> + Send;

    /// List a user's entries, newest first.
    fn list_by_user(
        &self,
        user_id: &UserId,
        limit: Option<u32>,
    ) -> impl std::future::Future<Output = Result<Vec<GratitudeRecord>, RepositoryError>> + Send;
}
