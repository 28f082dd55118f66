//! Business logic and storage trait definitions for the Grateful bot.
//!
//! This crate defines the "ports" (repository and document-store traits) that
//! the infrastructure layer implements, the gratitude and user services, and
//! the conversation handler that turns inbound chat events into replies. It
//! depends only on `grateful-types` -- never on `grateful-infra` or any
//! database/IO crate.

pub mod conversation;
pub mod replies;
pub mod repository;
pub mod service;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;
