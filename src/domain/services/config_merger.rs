//! Configuration merger
//!
//! Layers global vars, base metadata and a selected target into one
//! [`EffectiveConfig`]:
//!
//! 1. load `metadata.yml` (absent → convention folders only)
//! 2. load global vars; existing metadata vars win
//! 3. build the base config, falling back to convention folders
//! 4. build the target config; overlays apply onto the base folder list
//! 5. target over base
//! 6. result over the caller-supplied starting config

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::folder_assembler::FolderAssembler;
use crate::domain::entities::{
    EffectiveConfig, GlobalVars, HelmChart, MetadataConfig, RawMetadata,
};
use crate::domain::ports::FileSystem;
use crate::error::{KubeDeployError, KubeDeployResult};

/// Metadata file names probed in the config folder, in order
pub const METADATA_FILES: [&str; 2] = ["metadata.yml", "metadata.yaml"];

pub const GLOBAL_VARS_FILE: &str = "global_vars.yml";

pub struct ConfigMerger<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    metadata_file: Option<PathBuf>,
    global_vars_file: Option<PathBuf>,
}

impl<'a, F: FileSystem + ?Sized> ConfigMerger<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self {
            fs,
            metadata_file: None,
            global_vars_file: None,
        }
    }

    /// Metadata file tried before the config folder's own
    pub fn with_metadata_file(mut self, path: Option<PathBuf>) -> Self {
        self.metadata_file = path;
        self
    }

    /// Global vars file tried before the conventional locations
    pub fn with_global_vars_file(mut self, path: Option<PathBuf>) -> Self {
        self.global_vars_file = path;
        self
    }

    pub fn resolve(
        &self,
        config_folder: &Path,
        target: Option<&str>,
        start: EffectiveConfig,
    ) -> KubeDeployResult<EffectiveConfig> {
        let mut metadata = match self.load_metadata(config_folder)? {
            Some(metadata) => metadata,
            None => {
                info!(
                    "no metadata file in {}, using conventional folders",
                    config_folder.display()
                );
                RawMetadata::default()
            }
        };

        if let Some(global) = self.load_global_vars(config_folder)? {
            metadata.absorb_global_vars(global);
        }

        let root = metadata.base();
        let base = self.build(config_folder, &root, root.helm.as_ref(), true);

        let merged = match target.filter(|name| !name.is_empty()) {
            None => base,
            Some(name) => {
                let target = metadata
                    .target(name)
                    .ok_or_else(|| KubeDeployError::TargetNotFound {
                        name: name.to_string(),
                    })?;
                info!("found target overrides for {}", name);

                let overrides = target.config();
                let default_chart = overrides.helm.as_ref().or(root.helm.as_ref());
                let mut target_config = self.build(config_folder, &overrides, default_chart, false);

                if overrides.folders.is_empty() {
                    if !target.merge_folders.is_empty() {
                        let assembler = FolderAssembler::new(self.fs, config_folder, default_chart);
                        target_config.units =
                            assembler.merge_overlays(base.units.clone(), &target.merge_folders)?;
                    }
                } else if !target.merge_folders.is_empty() {
                    return Err(KubeDeployError::ConflictingFolders {
                        target: name.to_string(),
                    });
                }

                target_config.merge_over(base)
            }
        };

        let mut config = merged.merge_over(start);
        config.inherit_helm_chart();
        config.validate()?;
        Ok(config)
    }

    fn build(
        &self,
        config_folder: &Path,
        source: &MetadataConfig,
        default_chart: Option<&HelmChart>,
        use_convention_defaults: bool,
    ) -> EffectiveConfig {
        let assembler = FolderAssembler::new(self.fs, config_folder, default_chart);

        EffectiveConfig {
            namespace: source.namespace.clone(),
            release_name: source.release_name.clone(),
            units: assembler.assemble(&source.folders, use_convention_defaults),
            vars: source.vars.clone(),
            helm_chart: source.helm.clone(),
            bastion: source.bastion.clone(),
        }
    }

    fn load_metadata(&self, config_folder: &Path) -> KubeDeployResult<Option<RawMetadata>> {
        let candidates = self
            .metadata_file
            .iter()
            .cloned()
            .chain(METADATA_FILES.iter().map(|name| config_folder.join(name)));

        self.load_first(candidates)
    }

    fn load_global_vars(&self, config_folder: &Path) -> KubeDeployResult<Option<GlobalVars>> {
        let candidates = self.global_vars_file.iter().cloned().chain([
            PathBuf::from(GLOBAL_VARS_FILE),
            config_folder.join(GLOBAL_VARS_FILE),
        ]);

        self.load_first(candidates)
    }

    /// Parse the first candidate file that exists
    fn load_first<T>(
        &self,
        candidates: impl IntoIterator<Item = PathBuf>,
    ) -> KubeDeployResult<Option<T>>
    where
        T: DeserializeOwned + Default,
    {
        for path in candidates {
            if path.as_os_str().is_empty() || !self.fs.exists(&path) || self.fs.is_dir(&path) {
                continue;
            }

            info!("loading config from {}", path.display());
            let content = self.fs.read_to_string(&path)?;
            return parse_yaml(&path, &content).map(Some);
        }

        Ok(None)
    }
}

/// Parse YAML, warning about keys that are not understood
pub fn parse_yaml<T>(file: &Path, content: &str) -> KubeDeployResult<T>
where
    T: DeserializeOwned + Default,
{
    if is_blank_yaml(content) {
        debug!("{} is empty", file.display());
        return Ok(T::default());
    }

    let deserializer = serde_yaml_ng::Deserializer::from_str(content);
    serde_ignored::deserialize(deserializer, |key| {
        warn!("ignoring unknown key {} in {}", key, file.display());
    })
    .map_err(|e| KubeDeployError::InvalidConfig {
        file: file.to_path_buf(),
        message: e.to_string(),
    })
}

fn is_blank_yaml(content: &str) -> bool {
    content
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#') || line == "---")
}
