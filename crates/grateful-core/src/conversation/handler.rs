//! Conversation handler: one inbound event in, exactly one reply out.

use chrono::Utc;
use grateful_types::conversation::{ConversationState, EventKind, InboundEvent};
use grateful_types::error::GratitudeError;
use tracing::{debug, info, warn};

use super::state::ConversationStore;
use super::transport::ReplySink;
use crate::replies;
use crate::repository::gratitude::GratitudeRepository;
use crate::repository::user::UserRepository;
use crate::service::gratitude::GratitudeService;
use crate::service::user::UserService;

/// Number of entries shown for the history command when not configured.
pub const DEFAULT_HISTORY_LIMIT: u32 = 5;

/// Routes inbound chat events through the per-user state machine.
///
/// `Idle -> AwaitingGratitude` on start; a non-blank answer goes back to
/// `Idle` whether or not it was saved. Errors never escape: each one becomes
/// a reply.
pub struct ConversationHandler<G, U, S>
where
    G: GratitudeRepository,
    U: UserRepository,
    S: ReplySink,
{
    gratitude: GratitudeService<G>,
    users: UserService<U>,
    sink: S,
    store: ConversationStore,
    history_limit: u32,
}

impl<G, U, S> ConversationHandler<G, U, S>
where
    G: GratitudeRepository,
    U: UserRepository,
    S: ReplySink,
{
    pub fn new(
        gratitude: GratitudeService<G>,
        users: UserService<U>,
        sink: S,
        store: ConversationStore,
    ) -> Self {
        Self {
            gratitude,
            users,
            sink,
            store,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_history_limit(mut self, limit: u32) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn gratitude(&self) -> &GratitudeService<G> {
        &self.gratitude
    }

    pub fn users(&self) -> &UserService<U> {
        &self.users
    }

    /// Ask every opted-in user the gratitude question and move them to
    /// `AwaitingGratitude`. Returns how many reminders were sent.
    ///
    /// Each user's slot is locked while their reminder goes out, so a
    /// reminder never interleaves with an event being handled for them.
    pub async fn send_reminders(&self) -> usize {
        let subscribers = match self.users.reminder_subscribers().await {
            Ok(users) => users,
            Err(e) => {
                warn!(error = %e, "Failed to load reminder subscribers");
                return 0;
            }
        };

        for user in &subscribers {
            let mut slot = self.store.lock(&user.user_id).await;
            slot.last_activity = Utc::now();
            slot.state = ConversationState::AwaitingGratitude;

            let prompt = replies::prompt(user.display_name.as_deref());
            self.sink.send(&user.user_id, &prompt).await;
            debug!(user_id = %user.user_id, "Reminder sent");
        }

        subscribers.len()
    }

    /// Process one event and send its reply.
    ///
    /// The user's slot stays locked until the reply has been handed to the
    /// sink, so events from the same user are applied one at a time. The
    /// reply is also returned to the caller.
    pub async fn handle(&self, event: InboundEvent) -> String {
        let mut slot = self.store.lock(&event.user_id).await;
        slot.last_activity = Utc::now();

        let current = slot.state;
        let (reply, next) = self.dispatch(&event, current).await;
        if next != current {
            debug!(user_id = %event.user_id, from = %current, to = %next, "Conversation state changed");
        }
        slot.state = next;

        self.sink.send(&event.user_id, &reply).await;
        reply
    }

    async fn dispatch(
        &self,
        event: &InboundEvent,
        state: ConversationState,
    ) -> (String, ConversationState) {
        let user_id = &event.user_id;

        match (&event.kind, state) {
            (EventKind::Start, _) => {
                let name = event.display_name.as_deref();
                if let Err(e) = self.users.ensure_registered(user_id, name).await {
                    warn!(user_id = %user_id, error = %e, "Failed to register user");
                }
                (replies::prompt(name), ConversationState::AwaitingGratitude)
            }

            (EventKind::Text(text), ConversationState::AwaitingGratitude) => {
                match self.gratitude.handle_gratitude(user_id, text).await {
                    Ok(reply) => (reply, ConversationState::Idle),
                    Err(GratitudeError::Empty) => (
                        replies::EMPTY_INPUT.to_string(),
                        ConversationState::AwaitingGratitude,
                    ),
                    Err(e) => (replies::for_error(&e).to_string(), ConversationState::Idle),
                }
            }

            (EventKind::Text(_), ConversationState::Idle) => {
                debug!(user_id = %user_id, "Ignoring text while idle");
                (replies::IDLE_HINT.to_string(), ConversationState::Idle)
            }

            (EventKind::Cancel, ConversationState::AwaitingGratitude) => {
                (replies::CANCELLED.to_string(), ConversationState::Idle)
            }

            (EventKind::Cancel, ConversationState::Idle) => {
                (replies::NOTHING_TO_CANCEL.to_string(), ConversationState::Idle)
            }

            (EventKind::History, state) => {
                let reply = match self
                    .gratitude
                    .recent_entries(user_id, Some(self.history_limit))
                    .await
                {
                    Ok(records) => replies::history(&records),
                    Err(e) => {
                        warn!(user_id = %user_id, error = %e, "Failed to load gratitude history");
                        replies::HISTORY_UNAVAILABLE.to_string()
                    }
                };
                (reply, state)
            }

            (EventKind::Remind(None), state) => {
                let reply = match self.users.reminder_enabled(user_id).await {
                    Ok(enabled) => replies::reminder_status(enabled),
                    Err(e) => {
                        warn!(user_id = %user_id, error = %e, "Failed to load reminder preference");
                        replies::REMINDER_UPDATE_FAILED
                    }
                };
                (reply.to_string(), state)
            }

            (EventKind::Remind(Some(enabled)), state) => {
                let name = event.display_name.as_deref();
                let reply = match self.users.set_reminder(user_id, name, *enabled).await {
                    Ok(_) if *enabled => replies::REMINDERS_ON,
                    Ok(_) => replies::REMINDERS_OFF,
                    Err(e) => {
                        warn!(user_id = %user_id, error = %e, "Failed to update reminder preference");
                        replies::REMINDER_UPDATE_FAILED
                    }
                };
                info!(user_id = %user_id, enabled = *enabled, "Reminder toggle handled");
                (reply.to_string(), state)
            }

            (EventKind::UnknownCommand(command), state) => {
                debug!(user_id = %user_id, command = %command, "Unknown command");
                (replies::UNKNOWN_COMMAND.to_string(), state)
            }

            (EventKind::Other(kind), state) => {
                debug!(user_id = %user_id, kind = %kind, "Unsupported event");
                (replies::UNSUPPORTED.to_string(), state)
            }
        }
    }
}
