//! Tracing Event Sink
//!
//! Renders deploy events as log lines for interactive runs.

use tracing::{info, warn};

use crate::domain::ports::{DeployEvent, DeployEventSink};

pub struct TracingEventSink;

impl DeployEventSink for TracingEventSink {
    fn on_event(&self, event: DeployEvent) {
        match event {
            DeployEvent::Started {
                namespace,
                unit_count,
            } => info!("deploying {} folders into {}", unit_count, namespace),
            DeployEvent::NamespaceReady { namespace } => info!("namespace {} ready", namespace),
            DeployEvent::UnitStarted {
                index, path, order, ..
            } => info!("[{}] {} (order {})", index + 1, path.display(), order),
            DeployEvent::SecretApplied {
                file,
                name,
                namespace,
            } => info!("secret {}/{} created from {}", namespace, name, file.display()),
            DeployEvent::SecretSkipped { file, reason } => {
                warn!("secret {} skipped: {}", file.display(), reason)
            }
            DeployEvent::UnitApplied { index, path } => {
                info!("[{}] {} applied", index + 1, path.display())
            }
            DeployEvent::FolderMissing { path, .. } => {
                info!("{} does not exist, stopping here", path.display())
            }
            DeployEvent::Completed { applied_count } => {
                info!("deploy complete, {} folders applied", applied_count)
            }
            // the error itself is logged where it is raised
            DeployEvent::Failed { .. } => {}
        }
    }
}
