//! Fake repositories shared by the service and handler tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use grateful_types::error::RepositoryError;
use grateful_types::gratitude::{EntryId, GratitudeEntry, GratitudeRecord, UserId};
use grateful_types::user::User;

use crate::repository::gratitude::GratitudeRepository;
use crate::repository::user::UserRepository;

/// Records saved entries; optionally fails or stalls every call.
#[derive(Clone, Default)]
pub(crate) struct FakeGratitudeRepo {
    saved: Arc<Mutex<Vec<GratitudeEntry>>>,
    save_calls: Arc<AtomicUsize>,
    failing: bool,
    delay: Option<Duration>,
}

impl FakeGratitudeRepo {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub(crate) fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub(crate) fn saved(&self) -> Vec<GratitudeEntry> {
        self.saved.lock().unwrap().clone()
    }

    pub(crate) fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }
}

impl GratitudeRepository for FakeGratitudeRepo {
    async fn save(&self, entry: &GratitudeEntry) -> Result<EntryId, RepositoryError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing {
            return Err(RepositoryError::Connection("connection refused".to_string()));
        }

        let mut saved = self.saved.lock().unwrap();
        saved.push(entry.clone());
        Ok(EntryId::new(format!("entry-{}", saved.len())))
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        limit: Option<u32>,
    ) -> Result<Vec<GratitudeRecord>, RepositoryError> {
        if self.failing {
            return Err(RepositoryError::Connection("connection refused".to_string()));
        }

        let saved = self.saved.lock().unwrap();
        let limit = limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(saved
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, e)| &e.user_id == user_id)
            .take(limit)
            .map(|(i, e)| GratitudeRecord::from_entry(EntryId::new(format!("entry-{}", i + 1)), e.clone()))
            .collect())
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeUserRepo {
    users: Arc<Mutex<HashMap<UserId, User>>>,
    failing: bool,
}

impl FakeUserRepo {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }
}

impl UserRepository for FakeUserRepo {
    async fn get(&self, user_id: &UserId) -> Result<Option<User>, RepositoryError> {
        if self.failing {
            return Err(RepositoryError::Timeout(Duration::from_secs(5)));
        }
        Ok(self.users.lock().unwrap().get(user_id).cloned())
    }

    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        if self.failing {
            return Err(RepositoryError::Timeout(Duration::from_secs(5)));
        }
        self.users
            .lock()
            .unwrap()
            .insert(user.user_id.clone(), user.clone());
        Ok(())
    }

    async fn list_reminder_subscribers(&self) -> Result<Vec<User>, RepositoryError> {
        if self.failing {
            return Err(RepositoryError::Timeout(Duration::from_secs(5)));
        }
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|u| u.reminder_enabled)
            .cloned()
            .collect())
    }
}
