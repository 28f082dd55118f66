//! Fixed reply texts sent back to chat users.
//!
//! Replies never carry internal error details; [`for_error`] is the only
//! place a `GratitudeError` is turned into user-facing text.

use grateful_types::error::GratitudeError;
use grateful_types::gratitude::GratitudeRecord;

pub const THANK_YOU: &str =
    "Thank you for sharing! 🙏\nYour response has been collected ✅\nHave a wonderful day! ✨";

pub const EMPTY_INPUT: &str =
    "That message was empty. Please share a bit about what you're grateful for and try again. 🌟";

pub const PERSISTENCE_FAILED: &str =
    "Sorry, I couldn't save that right now. Please try again later.";

pub const IDLE_HINT: &str = "Send /start whenever you'd like to share what you're grateful for! 🎯";

pub const CANCELLED: &str = "No problem, maybe next time! 🏠";

pub const NOTHING_TO_CANCEL: &str = "There's nothing to cancel. Send /start to begin. 🏠";

pub const UNSUPPORTED: &str =
    "I only understand text. Send /start to share what you're grateful for, or /history to see past entries.";

pub const UNKNOWN_COMMAND: &str = "I don't know that command. Send /start to share what you're grateful for, /history to see past entries, or /remind on|off for daily reminders.";

pub const REMINDERS_ON: &str =
    "Daily reminders are on. I'll ask what you're grateful for once a day. Send /remind off to stop. ⏰";

pub const REMINDERS_OFF: &str = "Daily reminders are off. Send /remind on to turn them back on.";

pub const REMINDER_UPDATE_FAILED: &str =
    "Sorry, I couldn't update your reminder setting right now. Please try again later.";

pub const HISTORY_EMPTY: &str = "You haven't shared anything yet. Send /start to begin! 🌱";

pub const HISTORY_UNAVAILABLE: &str =
    "Sorry, I couldn't load your entries right now. Please try again later.";

/// The gratitude question, greeting the user by name when known.
pub fn prompt(display_name: Option<&str>) -> String {
    match display_name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => format!("Hello {name}! 🌟\n\nWhat are you grateful for today?"),
        None => "Hello! 🌟\n\nWhat are you grateful for today?".to_string(),
    }
}

/// Answer to `/remind` without an argument.
pub fn reminder_status(enabled: bool) -> &'static str {
    if enabled {
        "Daily reminders are on. Send /remind off to stop them."
    } else {
        "Daily reminders are off. Send /remind on to get one every day."
    }
}

pub fn for_error(err: &GratitudeError) -> &'static str {
    match err {
        GratitudeError::Empty => EMPTY_INPUT,
        GratitudeError::PersistenceFailed(_) => PERSISTENCE_FAILED,
    }
}

/// Render recent entries as a short numbered list.
pub fn history(records: &[GratitudeRecord]) -> String {
    if records.is_empty() {
        return HISTORY_EMPTY.to_string();
    }

    let mut out = String::from("Your recent gratitude entries:\n");
    for (i, record) in records.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. {} ({})",
            i + 1,
            record.text,
            record.created_at.format("%Y-%m-%d")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use grateful_types::error::RepositoryError;
    use grateful_types::gratitude::{EntryId, UserId};

    #[test]
    fn test_prompt_with_and_without_name() {
        assert_eq!(
            prompt(Some("Ana")),
            "Hello Ana! 🌟\n\nWhat are you grateful for today?"
        );
        assert!(prompt(None).starts_with("Hello! 🌟"));
        assert_eq!(prompt(Some("  ")), prompt(None));
    }

    #[test]
    fn test_for_error_hides_details() {
        let err = GratitudeError::PersistenceFailed(RepositoryError::Connection(
            "tcp 10.0.0.3:5432 refused".to_string(),
        ));
        let reply = for_error(&err);
        assert_eq!(reply, PERSISTENCE_FAILED);
        assert!(!reply.contains("10.0.0.3"));
        assert_eq!(for_error(&GratitudeError::Empty), EMPTY_INPUT);
    }

    #[test]
    fn test_history_rendering() {
        assert_eq!(history(&[]), HISTORY_EMPTY);

        let records = vec![
            GratitudeRecord {
                id: EntryId::new("b"),
                user_id: UserId::from(1),
                text: "sunshine".to_string(),
                created_at: chrono::Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
            },
            GratitudeRecord {
                id: EntryId::new("a"),
                user_id: UserId::from(1),
                text: "coffee".to_string(),
                created_at: chrono::Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
            },
        ];
        let rendered = history(&records);
        assert!(rendered.contains("1. sunshine (2026-03-02)"));
        assert!(rendered.contains("2. coffee (2026-03-01)"));
    }
}
