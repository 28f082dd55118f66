//! Conversation events and per-user conversation state.
//!
//! Transports translate their native updates into [`InboundEvent`]s; the
//! conversation handler matches on [`EventKind`] exhaustively.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::gratitude::UserId;

/// Where a user currently is in the one-question conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingGratitude,
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversationState::Idle => write!(f, "idle"),
            ConversationState::AwaitingGratitude => write!(f, "awaiting_gratitude"),
        }
    }
}

/// What kind of inbound event a transport delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// The start command: ask the gratitude question.
    Start,
    /// Free text typed by the user.
    Text(String),
    /// Leave the question without answering.
    Cancel,
    /// Show the user's most recent entries.
    History,
    /// Daily reminder preference: `Some(true)` opts in, `Some(false)` opts
    /// out, `None` asks for the current setting.
    Remind(Option<bool>),
    /// A slash command the bot does not know.
    UnknownCommand(String),
    /// A non-text update (sticker, photo, ...), named by the transport.
    Other(String),
}

impl EventKind {
    /// Classify a raw text message.
    ///
    /// Commands are matched case-insensitively and may carry a platform
    /// `@botname` suffix (`/start@grateful_bot`). Unknown commands become
    /// `UnknownCommand`; everything that is not a command is `Text`,
    /// untrimmed.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if !trimmed.starts_with('/') {
            return EventKind::Text(raw.to_string());
        }

        let mut words = trimmed.split_whitespace();
        let command = words
            .next()
            .unwrap_or(trimmed)
            .split('@')
            .next()
            .unwrap_or_default()
            .to_lowercase();

        match command.as_str() {
            "/start" => EventKind::Start,
            "/cancel" | "/stop" => EventKind::Cancel,
            "/history" => EventKind::History,
            "/remind" | "/reminders" => EventKind::Remind(parse_switch(words.next())),
            _ => EventKind::UnknownCommand(command),
        }
    }
}

fn parse_switch(arg: Option<&str>) -> Option<bool> {
    match arg?.to_lowercase().as_str() {
        "on" | "yes" | "enable" => Some(true),
        "off" | "no" | "disable" => Some(false),
        _ => None,
    }
}

/// One inbound chat event, already stripped of transport details.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    pub user_id: UserId,
    /// Sender's display name, when the platform supplies one.
    pub display_name: Option<String>,
    pub kind: EventKind,
}

impl InboundEvent {
    pub fn new(user_id: impl Into<UserId>, kind: EventKind) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: None,
            kind,
        }
    }

    pub fn start(user_id: impl Into<UserId>) -> Self {
        Self::new(user_id, EventKind::Start)
    }

    pub fn message(user_id: impl Into<UserId>, text: impl Into<String>) -> Self {
        Self::new(user_id, EventKind::Text(text.into()))
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}
