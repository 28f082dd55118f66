//! Local console transport.
//!
//! Lines typed in the terminal become inbound events for the conversation
//! handler; replies come back through a `ChannelSink` and are printed above
//! the prompt. Entry point: `loop_runner::run_chat_loop`.

pub mod input;
pub mod loop_runner;
