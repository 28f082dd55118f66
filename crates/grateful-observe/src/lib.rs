//! Observability setup for the Grateful bot: structured logging through
//! `tracing`, with optional OpenTelemetry span export.

pub mod tracing_setup;
