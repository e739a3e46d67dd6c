//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementations (Local, Memory)
//! - `events/` - Deploy event sinks (JSON, tracing)
//! - `kube` / `ejson` - Subprocess-backed cluster and secret decryptor
//! - `source` / `workspace` - Config source and per-run working copy
//! - `kubeconfig` / `env` / `tunnel` - Cluster access for a run

pub mod ejson;
pub mod env;
pub mod events;
pub mod fs;
pub mod kube;
pub mod kubeconfig;
pub mod process;
pub mod source;
pub mod tunnel;
pub mod workspace;

// Re-export for convenience
pub use ejson::EjsonDecryptor;
pub use env::{EnvConfig, RunEnv};
pub use events::{JsonEventSink, TracingEventSink};
pub use fs::{LocalFs, MemoryFs};
pub use kube::CommandCluster;
pub use kubeconfig::{Kubeconfig, KubeconfigSources};
pub use source::ConfigSource;
pub use tunnel::Tunnel;
pub use workspace::Workspace;
