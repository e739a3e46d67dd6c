//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - Runs a resolved plan: namespace, secrets, then each folder
//!   through kubectl, kustomize or helm

pub mod deploy;

pub use deploy::{DeployOptions, DeployReport, DeployUseCase, SecretKey};
