//! Conversation handling: per-user state, the outbound reply seam, the
//! handler that ties inbound events to the services, and the daily reminder.

pub mod handler;
pub mod reminder;
pub mod state;
pub mod transport;
