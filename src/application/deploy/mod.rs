//! Deploy Module
//!
//! Executes a resolved deployment plan.
//!
//! ## Structure
//!
//! - `options` - Run configuration (`DeployOptions`, `SecretKey`)
//! - `result` - Run summary (`DeployReport`)
//! - `secrets` - ejson secret injection (`SecretInjector`)
//! - `helm` - Helm repository and release argument planning
//! - `use_case` - The deployment driver (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use kube_deploy::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(cluster, decryptor, working_copy, DeployOptions::new());
//! let report = use_case.run(&config)?;
//! ```

pub mod helm;
mod options;
mod result;
mod secrets;
mod use_case;

pub use options::{DeployOptions, SecretKey, DEFAULT_KEYRING_DIR};
pub use result::DeployReport;
pub use secrets::{secret_manifest, SecretInjector, SecretOutcome, SECRET_EXTENSION};
pub use use_case::DeployUseCase;
