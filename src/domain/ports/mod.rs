//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod cluster;
pub mod deploy_events;
pub mod file_system;
pub mod secret_decryptor;

pub use cluster::{namespace_manifest, Cluster, HelmRepo};
pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink};
pub use file_system::{normalize, FileSystem, FsError, FsResult};
pub use secret_decryptor::SecretDecryptor;
