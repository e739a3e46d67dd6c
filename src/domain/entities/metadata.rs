//! Raw metadata as authored in `metadata.yml` / `global_vars.yml`
//!
//! Keys are camelCase; the PascalCase spellings used by older config
//! folders are accepted as aliases.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::{Bastion, HelmChart};
use crate::domain::value_objects::RenderEngine;

/// User-authored description of a deployment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMetadata {
    /// Default helm chart for helm units without their own chart
    #[serde(alias = "Helm")]
    pub helm: Option<HelmChart>,

    #[serde(alias = "Targets")]
    pub targets: Vec<Target>,

    #[serde(alias = "Vars", deserialize_with = "scalar_map")]
    pub vars: BTreeMap<String, String>,

    #[serde(alias = "Namespace")]
    pub namespace: String,

    #[serde(alias = "ReleaseName")]
    pub release_name: String,

    #[serde(alias = "Folders")]
    pub folders: Vec<FolderSpec>,

    #[serde(alias = "Bastion")]
    pub bastion: Option<Bastion>,
}

impl RawMetadata {
    /// Top-level (non-target) fields
    pub fn base(&self) -> MetadataConfig {
        MetadataConfig {
            helm: self.helm.clone(),
            vars: self.vars.clone(),
            namespace: self.namespace.clone(),
            release_name: self.release_name.clone(),
            folders: self.folders.clone(),
            bastion: self.bastion.clone(),
        }
    }

    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Add global vars without overwriting keys already present
    pub fn absorb_global_vars(&mut self, global: GlobalVars) {
        for (key, value) in global.global_vars {
            self.vars.entry(key).or_insert(value);
        }
    }
}

/// The mergeable part of metadata, shared by the root and by targets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataConfig {
    pub helm: Option<HelmChart>,
    pub vars: BTreeMap<String, String>,
    pub namespace: String,
    pub release_name: String,
    pub folders: Vec<FolderSpec>,
    pub bastion: Option<Bastion>,
}

/// Named override bundle selectable at run time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Target {
    #[serde(alias = "Name")]
    pub name: String,

    #[serde(alias = "MergeFolders")]
    pub merge_folders: Vec<MergeFolder>,

    #[serde(alias = "Helm")]
    pub helm: Option<HelmChart>,

    #[serde(alias = "Vars", deserialize_with = "scalar_map")]
    pub vars: BTreeMap<String, String>,

    #[serde(alias = "Namespace")]
    pub namespace: String,

    #[serde(alias = "ReleaseName")]
    pub release_name: String,

    #[serde(alias = "Folders")]
    pub folders: Vec<FolderSpec>,

    #[serde(alias = "Bastion")]
    pub bastion: Option<Bastion>,
}

impl Target {
    pub fn config(&self) -> MetadataConfig {
        MetadataConfig {
            helm: self.helm.clone(),
            vars: self.vars.clone(),
            namespace: self.namespace.clone(),
            release_name: self.release_name.clone(),
            folders: self.folders.clone(),
            bastion: self.bastion.clone(),
        }
    }
}

/// A folder entry as written in metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FolderSpec {
    /// Folder path relative to the config folder
    #[serde(alias = "Path")]
    pub path: String,

    #[serde(alias = "RenderEngine")]
    pub render_engine: RenderEngine,

    #[serde(alias = "Order")]
    pub order: Option<i64>,

    #[serde(alias = "HelmChart", alias = "helm", alias = "Helm")]
    pub helm_chart: Option<HelmChart>,
}

/// Overlay applied by a target onto the base folder list
///
/// Either declares a new folder (`order` set) or replaces the render
/// attributes of an existing one (`insteadOf` set).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergeFolder {
    #[serde(alias = "InsteadOf")]
    pub instead_of: Option<String>,

    #[serde(alias = "Path")]
    pub path: String,

    #[serde(alias = "RenderEngine")]
    pub render_engine: RenderEngine,

    #[serde(alias = "Order")]
    pub order: Option<i64>,

    #[serde(alias = "HelmChart", alias = "helm", alias = "Helm")]
    pub helm_chart: Option<HelmChart>,
}

impl MergeFolder {
    pub fn folder(&self) -> FolderSpec {
        FolderSpec {
            path: self.path.clone(),
            render_engine: self.render_engine,
            order: self.order,
            helm_chart: self.helm_chart.clone(),
        }
    }

    /// insteadOf reference, ignoring blank values
    pub fn replaces(&self) -> Option<&str> {
        self.instead_of
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Contents of `global_vars.yml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalVars {
    #[serde(alias = "globalVars", alias = "GlobalVars", deserialize_with = "scalar_map")]
    pub global_vars: BTreeMap<String, String>,
}

/// Deserialize a map whose values may be any YAML scalar, stringifying them
fn scalar_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Null,
        Bool(bool),
        Int(i64),
        Float(f64),
        Str(String),
    }

    let raw: Option<BTreeMap<String, Scalar>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Scalar::Null => String::new(),
                Scalar::Bool(b) => b.to_string(),
                Scalar::Int(i) => i.to_string(),
                Scalar::Float(f) => f.to_string(),
                Scalar::Str(s) => s,
            };
            (key, value)
        })
        .collect())
}
