use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

use crate::error::GratitudeError;

/// Opaque identifier of a chat user, as supplied by the messaging platform.
///
/// Platforms hand out either integers or strings; both are kept in their
/// textual form so the rest of the system never has to care which.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier assigned to a gratitude entry by the document store.
///
/// Opaque to the domain: stores choose their own id scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user's gratitude statement, ready to be persisted.
///
/// Entries are immutable once written. `text` is always trimmed and never
/// empty when built through [`GratitudeEntry::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GratitudeEntry {
    pub user_id: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl GratitudeEntry {
    /// Build an entry stamped with the current time.
    ///
    /// Returns `GratitudeError::Empty` when `raw_text` is blank after trimming.
    pub fn new(user_id: UserId, raw_text: &str) -> Result<Self, GratitudeError> {
        Self::at(user_id, raw_text, Utc::now())
    }

    /// Build an entry with an explicit timestamp.
    pub fn at(
        user_id: UserId,
        raw_text: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, GratitudeError> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(GratitudeError::Empty);
        }

        Ok(Self {
            user_id,
            text: text.to_string(),
            created_at,
        })
    }
}

/// A gratitude entry as read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GratitudeRecord {
    pub id: EntryId,
    pub user_id: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl GratitudeRecord {
    pub fn from_entry(id: EntryId, entry: GratitudeEntry) -> Self {
        Self {
            id,
            user_id: entry.user_id,
            text: entry.text,
            created_at: entry.created_at,
        }
    }
}
