//! Outbound reply seam.
//!
//! The handler only knows `ReplySink`; network transports and the local
//! console implement it. Delivery is fire-and-forget: sinks log their own
//! failures instead of returning them.

use grateful_types::gratitude::UserId;
use tokio::sync::mpsc;
use tracing::warn;

pub trait ReplySink: Send + Sync {
    /// Deliver one reply to a user.
    fn send(&self, user_id: &UserId, text: &str) -> impl std::future::Future<Output = ()> + Send;
}

/// A reply addressed to a user, as queued by [`ChannelSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundReply {
    pub user_id: UserId,
    pub text: String,
}

/// Sink that queues replies on an unbounded channel for a delivery task.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<OutboundReply>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<OutboundReply>) -> Self {
        Self { tx }
    }

    /// Create a sink together with the receiving end of its queue.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<OutboundReply>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl ReplySink for ChannelSink {
    async fn send(&self, user_id: &UserId, text: &str) {
        let reply = OutboundReply {
            user_id: user_id.clone(),
            text: text.to_string(),
        };
        if self.tx.send(reply).is_err() {
            warn!(user_id = %user_id, "Reply channel closed, dropping reply");
        }
    }
}
