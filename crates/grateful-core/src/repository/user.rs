use grateful_types::error::RepositoryError;
use grateful_types::gratitude::UserId;
use grateful_types::user::User;

/// Repository trait for registered users.
pub trait UserRepository: Send + Sync {
    /// Get a user by platform id. Returns None if never registered.
    fn get(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Store a user record, replacing any previous record for the same id.
    fn create(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Users who opted in to the daily reminder.
    fn list_reminder_subscribers(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<User>, RepositoryError>> + Send;
}
