//! Domain Entities
//!
//! Core objects of the deployment model.

mod bastion;
mod deploy_unit;
mod effective_config;
mod helm_chart;
mod metadata;

pub use bastion::{Bastion, DEFAULT_API_PORT};
pub use deploy_unit::DeployUnit;
pub use effective_config::EffectiveConfig;
pub use helm_chart::HelmChart;
pub use metadata::{FolderSpec, GlobalVars, MergeFolder, MetadataConfig, RawMetadata, Target};
