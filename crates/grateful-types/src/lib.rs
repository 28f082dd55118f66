//! Shared domain types for the Grateful bot.
//!
//! Gratitude entries, users, conversation events and state, configuration,
//! and the error enums shared by every other crate.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod conversation;
pub mod error;
pub mod gratitude;
pub mod user;
