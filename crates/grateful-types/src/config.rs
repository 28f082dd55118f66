//! Configuration types for the Grateful bot.
//!
//! `GratefulConfig` represents `config.toml` in the data directory. Every
//! field has a default, so an empty or missing file is a valid configuration.
//! Secrets (the transport token) never live here; they come from the
//! environment.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level `config.toml` contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GratefulConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub conversation: ConversationConfig,

    #[serde(default)]
    pub reminders: ReminderConfig,
}

/// Storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Location of the document store. Defaults to `{data_dir}/grateful.db`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Upper bound for a single storage call before the bot gives up and
    /// answers with the fallback reply.
    #[serde(default = "default_storage_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_storage_timeout_secs() -> u64 {
    5
}

impl StorageConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            timeout_secs: default_storage_timeout_secs(),
        }
    }
}

/// Conversation-state settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Per-user state untouched for this long is dropped by the sweeper.
    #[serde(default = "default_idle_eviction_secs")]
    pub idle_eviction_secs: u64,

    /// How often the sweeper runs.
    #[serde(default = "default_eviction_interval_secs")]
    pub eviction_interval_secs: u64,

    /// Number of entries shown by the history command.
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,
}

fn default_idle_eviction_secs() -> u64 {
    24 * 60 * 60
}

fn default_eviction_interval_secs() -> u64 {
    300
}

fn default_history_limit() -> u32 {
    5
}

/// Lower bound for `idle_eviction_secs`.
pub const MIN_IDLE_EVICTION_SECS: u64 = 60;

impl ConversationConfig {
    pub fn idle_eviction(&self) -> Duration {
        Duration::from_secs(self.idle_eviction_secs.max(MIN_IDLE_EVICTION_SECS))
    }

    pub fn eviction_interval(&self) -> Duration {
        Duration::from_secs(self.eviction_interval_secs.max(1))
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            idle_eviction_secs: default_idle_eviction_secs(),
            eviction_interval_secs: default_eviction_interval_secs(),
            history_limit: default_history_limit(),
        }
    }
}

/// Daily reminder settings. Users still have to opt in with `/remind on`;
/// this only controls whether the scheduler runs and when it fires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Hour of day (UTC, 0-23) at which reminders go out.
    #[serde(default = "default_reminder_hour")]
    pub hour_utc: u32,

    #[serde(default)]
    pub minute: u32,
}

fn default_true() -> bool {
    true
}

fn default_reminder_hour() -> u32 {
    19
}

impl ReminderConfig {
    /// Whether `hour_utc:minute` is a valid time of day.
    pub fn is_valid_time(&self) -> bool {
        self.hour_utc < 24 && self.minute < 60
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            hour_utc: default_reminder_hour(),
            minute: 0,
        }
    }
}
