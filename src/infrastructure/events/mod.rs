//! Event Sink Implementations
//!
//! Provides concrete implementations of DeployEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - TracingEventSink: Human-readable progress through the log

mod json;
mod tracing;

pub use self::json::JsonEventSink;
pub use self::tracing::TracingEventSink;
