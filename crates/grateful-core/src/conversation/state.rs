//! Per-user conversation state.
//!
//! Each user gets a slot behind its own async mutex. The handler holds that
//! mutex for the whole event, which serializes events per user while leaving
//! different users independent.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use grateful_types::conversation::ConversationState;
use grateful_types::gratitude::UserId;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Mutable conversation data for one user.
#[derive(Debug, Clone)]
pub struct UserSlot {
    pub state: ConversationState,
    pub last_activity: DateTime<Utc>,
}

impl UserSlot {
    fn new() -> Self {
        Self {
            state: ConversationState::Idle,
            last_activity: Utc::now(),
        }
    }
}

/// Explicit store of per-user conversation slots.
///
/// Cloning yields a handle to the same map. Users never seen before (or
/// evicted) are `Idle`.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    slots: Arc<DashMap<UserId, Arc<Mutex<UserSlot>>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the user's slot, creating it on first contact.
    ///
    /// The slot `Arc` is cloned out of the map before awaiting, so no DashMap
    /// guard is held across the await.
    pub async fn lock(&self, user_id: &UserId) -> OwnedMutexGuard<UserSlot> {
        let slot = self
            .slots
            .entry(user_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(UserSlot::new())))
            .clone();
        slot.lock_owned().await
    }

    /// Current state of a user, waiting for any in-flight event to finish.
    pub async fn state(&self, user_id: &UserId) -> ConversationState {
        let slot = self.slots.get(user_id).map(|entry| entry.value().clone());
        match slot {
            Some(slot) => slot.lock().await.state,
            None => ConversationState::Idle,
        }
    }

    /// Drop slots whose last activity is older than `cutoff`.
    ///
    /// Slots that are locked or about to be locked by a handler are kept.
    /// Returns the number of slots removed.
    pub fn evict_inactive(&self, cutoff: DateTime<Utc>) -> usize {
        let mut evicted = 0;
        self.slots.retain(|_, slot| {
            if Arc::strong_count(slot) > 1 {
                return true;
            }
            let keep = match slot.try_lock() {
                Ok(guard) => guard.last_activity >= cutoff,
                Err(_) => true,
            };
            if !keep {
                evicted += 1;
            }
            keep
        });
        evicted
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Periodically evict conversations idle for longer than `max_idle`.
///
/// Runs until `cancel` fires.
pub fn spawn_eviction_task(
    store: ConversationStore,
    max_idle: Duration,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // First tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Conversation eviction task stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let Some(cutoff) = chrono::Duration::from_std(max_idle)
                        .ok()
                        .and_then(|idle| Utc::now().checked_sub_signed(idle))
                    else {
                        continue;
                    };

                    let evicted = store.evict_inactive(cutoff);
                    if evicted > 0 {
                        debug!(evicted, remaining = store.len(), "Evicted idle conversations");
                    }
                }
            }
        }
    })
}
