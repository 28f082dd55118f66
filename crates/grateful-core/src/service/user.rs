//! User registration and reminder preferences.

use std::time::Duration;

use grateful_types::error::RepositoryError;
use grateful_types::gratitude::UserId;
use grateful_types::user::User;
use tracing::info;

use super::{DEFAULT_STORAGE_TIMEOUT, with_timeout};
use crate::repository::user::UserRepository;

pub struct UserService<U: UserRepository> {
    repo: U,
    storage_timeout: Duration,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(repo: U) -> Self {
        Self {
            repo,
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    pub fn with_storage_timeout(mut self, timeout: Duration) -> Self {
        self.storage_timeout = timeout;
        self
    }

    pub fn repo(&self) -> &U {
        &self.repo
    }

    /// Register the user unless a record already exists.
    ///
    /// Returns `true` when a new record was created.
    pub async fn ensure_registered(
        &self,
        user_id: &UserId,
        display_name: Option<&str>,
    ) -> Result<bool, RepositoryError> {
        if with_timeout(self.storage_timeout, self.repo.get(user_id))
            .await?
            .is_some()
        {
            return Ok(false);
        }

        let user = User::new(user_id.clone(), display_name.map(str::to_string));
        with_timeout(self.storage_timeout, self.repo.create(&user)).await?;
        info!(user_id = %user_id, "New user registered");
        Ok(true)
    }

    /// Turn the daily reminder on or off, registering the user first if
    /// needed. Returns the stored record.
    pub async fn set_reminder(
        &self,
        user_id: &UserId,
        display_name: Option<&str>,
        enabled: bool,
    ) -> Result<User, RepositoryError> {
        let mut user = with_timeout(self.storage_timeout, self.repo.get(user_id))
            .await?
            .unwrap_or_else(|| User::new(user_id.clone(), display_name.map(str::to_string)));
        user.reminder_enabled = enabled;

        with_timeout(self.storage_timeout, self.repo.create(&user)).await?;
        info!(user_id = %user_id, enabled, "Reminder preference updated");
        Ok(user)
    }

    /// Whether the user opted in. Unknown users are not subscribed.
    pub async fn reminder_enabled(&self, user_id: &UserId) -> Result<bool, RepositoryError> {
        let user = with_timeout(self.storage_timeout, self.repo.get(user_id)).await?;
        Ok(user.is_some_and(|u| u.reminder_enabled))
    }

    pub async fn reminder_subscribers(&self) -> Result<Vec<User>, RepositoryError> {
        with_timeout(self.storage_timeout, self.repo.list_reminder_subscribers()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeUserRepo;

    #[tokio::test]
    async fn test_registers_once() {
        let repo = FakeUserRepo::new();
        let service = UserService::new(repo.clone());

        assert!(service.ensure_registered(&UserId::from(8), Some("Ana")).await.unwrap());
        assert!(!service.ensure_registered(&UserId::from(8), Some("Ana")).await.unwrap());

        let user = repo.get(&UserId::from(8)).await.unwrap().unwrap();
        assert_eq!(user.display_name.as_deref(), Some("Ana"));
    }

    #[tokio::test]
    async fn test_failure_propagates() {
        let service = UserService::new(FakeUserRepo::failing());
        let err = service
            .ensure_registered(&UserId::from(8), None)
            .await
            .unwrap_err();
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_set_reminder_toggles_and_registers() {
        let repo = FakeUserRepo::new();
        let service = UserService::new(repo.clone());
        let id = UserId::from(8);

        assert!(!service.reminder_enabled(&id).await.unwrap());

        let user = service.set_reminder(&id, Some("Ana"), true).await.unwrap();
        assert!(user.reminder_enabled);
        assert_eq!(user.display_name.as_deref(), Some("Ana"));
        assert!(service.reminder_enabled(&id).await.unwrap());
        assert_eq!(service.reminder_subscribers().await.unwrap().len(), 1);

        service.set_reminder(&id, None, false).await.unwrap();
        assert!(!service.reminder_enabled(&id).await.unwrap());
        assert!(service.reminder_subscribers().await.unwrap().is_empty());

        // Turning reminders off keeps the rest of the record.
        let stored = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.display_name.as_deref(), Some("Ana"));
    }
}
