//! Deploy Event Port
//!
//! Provides an observable interface for deploy runs.
//! Enables progress logging, JSON event streams, and test assertions.

use std::path::PathBuf;

use crate::domain::value_objects::RenderEngine;

/// Event emitted during a deploy run
#[derive(Debug, Clone, PartialEq)]
pub enum DeployEvent {
    /// Run started
    Started { namespace: String, unit_count: usize },

    /// Namespace exists (created or already present)
    NamespaceReady { namespace: String },

    /// A unit is about to be dispatched
    UnitStarted {
        index: usize,
        path: PathBuf,
        order: i64,
        engine: RenderEngine,
    },

    /// A secret was applied from an ejson file
    SecretApplied {
        file: PathBuf,
        name: String,
        namespace: String,
    },

    /// An ejson file was skipped as invalid
    SecretSkipped { file: PathBuf, reason: String },

    /// A unit was applied successfully
    UnitApplied { index: usize, path: PathBuf },

    /// A unit folder does not exist; the run stops here successfully
    FolderMissing { index: usize, path: PathBuf },

    /// Run completed
    Completed { applied_count: usize },

    /// Run failed
    Failed { error: String },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - TracingEventSink: structured log lines
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {
        // Do nothing
    }
}
