//! kube-deploy - declarative deployment driver for Kubernetes
//!
//! kube-deploy reads a config folder (`metadata.yml` plus deploy folders),
//! merges it with the selected target into one ordered plan and applies
//! every folder to a cluster with `kubectl`, kustomize or `helm`, creating
//! ejson-encrypted secrets along the way.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{DeployOptions, DeployReport, DeployUseCase, SecretKey};
pub use domain::entities::{DeployUnit, EffectiveConfig, HelmChart, RawMetadata};
pub use domain::services::ConfigMerger;
pub use domain::value_objects::RenderEngine;
pub use error::{ErrorKind, KubeDeployError, KubeDeployResult};
