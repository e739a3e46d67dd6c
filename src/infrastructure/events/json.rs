//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};

use crate::domain::ports::{DeployEvent, DeployEventSink};

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, mut event: serde_json::Value) {
        event["command"] = "deploy".into();
        event["ts"] = Utc::now()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
            .into();

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        let json = match event {
            DeployEvent::Started {
                namespace,
                unit_count,
            } => serde_json::json!({
                "event": "start",
                "namespace": namespace,
                "unit_count": unit_count,
            }),

            DeployEvent::NamespaceReady { namespace } => serde_json::json!({
                "event": "namespace_ready",
                "namespace": namespace,
            }),

            DeployEvent::UnitStarted {
                index,
                path,
                order,
                engine,
            } => serde_json::json!({
                "event": "item_start",
                "index": index,
                "path": path.display().to_string(),
                "order": order,
                "engine": engine.as_str(),
            }),

            DeployEvent::SecretApplied {
                file,
                name,
                namespace,
            } => serde_json::json!({
                "event": "secret_applied",
                "file": file.display().to_string(),
                "name": name,
                "namespace": namespace,
            }),

            DeployEvent::SecretSkipped { file, reason } => serde_json::json!({
                "event": "secret_skipped",
                "file": file.display().to_string(),
                "reason": reason,
            }),

            DeployEvent::UnitApplied { index, path } => serde_json::json!({
                "event": "item_applied",
                "index": index,
                "path": path.display().to_string(),
            }),

            DeployEvent::FolderMissing { index, path } => serde_json::json!({
                "event": "folder_missing",
                "index": index,
                "path": path.display().to_string(),
            }),

            DeployEvent::Completed { applied_count } => serde_json::json!({
                "event": "complete",
                "status": "success",
                "applied": applied_count,
            }),

            DeployEvent::Failed { error } => serde_json::json!({
                "event": "complete",
                "status": "failed",
                "error": error,
            }),
        };

        self.write_event(json);
    }
}
