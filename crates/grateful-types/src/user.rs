//! Registered bot users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gratitude::UserId;

/// A user who has started a conversation with the bot at least once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    /// Name shown in greetings, when the platform supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Opted in to the daily gratitude reminder. Off until the user asks.
    #[serde(default)]
    pub reminder_enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(user_id: UserId, display_name: Option<String>) -> Self {
        Self {
            user_id,
            display_name: display_name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            reminder_enabled: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_display_name_dropped() {
        let user = User::new(UserId::from(7), Some("   ".to_string()));
        assert!(user.display_name.is_none());
    }

    #[test]
    fn test_user_serde_omits_missing_name() {
        let user = User::new(UserId::from(7), None);
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("display_name"));
        let parsed: User = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.user_id, UserId::from(7));
    }

    #[test]
    fn test_reminders_default_off() {
        assert!(!User::new(UserId::from(7), None).reminder_enabled);

        // Records written before the flag existed still load.
        let parsed: User =
            serde_json::from_str(r#"{"user_id":"7","created_at":"2026-03-01T09:00:00Z"}"#).unwrap();
        assert!(!parsed.reminder_enabled);
    }
}
