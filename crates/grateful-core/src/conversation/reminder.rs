//! Daily gratitude reminder.
//!
//! Once a day, at a fixed UTC time, every user who opted in with `/remind on`
//! is asked the gratitude question and moved to `AwaitingGratitude`.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::handler::ConversationHandler;
use super::transport::ReplySink;
use crate::repository::gratitude::GratitudeRepository;
use crate::repository::user::UserRepository;

/// Time of day (UTC) at which reminders go out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    at: NaiveTime,
}

impl DailySchedule {
    /// `None` when `hour`/`minute` are not a valid time of day.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self::at)
    }

    pub fn at(at: NaiveTime) -> Self {
        Self { at }
    }

    pub fn time(&self) -> NaiveTime {
        self.at
    }

    /// First occurrence strictly after `now`.
    pub fn next_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.date_naive().and_time(self.at).and_utc();
        if today > now {
            today
        } else {
            today + TimeDelta::days(1)
        }
    }
}

/// Send the daily reminder at every occurrence of `schedule`.
///
/// Runs until `cancel` fires.
pub fn spawn_reminder_task<G, U, S>(
    handler: Arc<ConversationHandler<G, U, S>>,
    schedule: DailySchedule,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    G: GratitudeRepository + 'static,
    U: UserRepository + 'static,
    S: ReplySink + 'static,
{
    tokio::spawn(async move {
        // Advance from the last fire time so an occurrence fires only once.
        let mut after = Utc::now();

        loop {
            let next = schedule.next_after(after);
            let wait = (next - Utc::now()).to_std().unwrap_or(Duration::ZERO);
            debug!(next = %next, "Next gratitude reminder scheduled");

            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Reminder task stopped");
                    break;
                }
                _ = tokio::time::sleep(wait) => {
                    let sent = handler.send_reminders().await;
                    info!(sent, "Daily gratitude reminders sent");
                    after = next;
                }
            }
        }
    })
}
