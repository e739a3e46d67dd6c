//! Folder assembler
//!
//! Turns folder declarations into an ordered list of deploy units:
//! - explicit folders: order is the list position unless set
//! - otherwise the conventional folders that exist under the config folder
//! - target overlays either append new units or replace existing ones in place

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::entities::{DeployUnit, FolderSpec, HelmChart, MergeFolder};
use crate::domain::ports::{normalize, FileSystem};
use crate::domain::value_objects::RenderEngine;
use crate::error::{KubeDeployError, KubeDeployResult};

/// A folder discovered by naming convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConventionFolder {
    pub name: &'static str,
    pub render_engine: RenderEngine,
    pub order: i64,
}

/// Conventional folders, in execution order
pub const CONVENTION_FOLDERS: [ConventionFolder; 4] = [
    ConventionFolder {
        name: "predeploy",
        render_engine: RenderEngine::Auto,
        order: 1,
    },
    ConventionFolder {
        name: "secrets",
        render_engine: RenderEngine::Auto,
        order: 2,
    },
    ConventionFolder {
        name: "helmvalues",
        render_engine: RenderEngine::Helm,
        order: 100,
    },
    ConventionFolder {
        name: "postdeploy",
        render_engine: RenderEngine::Auto,
        order: 101,
    },
];

pub struct FolderAssembler<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    root: PathBuf,
    default_chart: Option<&'a HelmChart>,
}

impl<'a, F: FileSystem + ?Sized> FolderAssembler<'a, F> {
    /// `root` is the config folder, relative to the file system root
    pub fn new(fs: &'a F, root: &Path, default_chart: Option<&'a HelmChart>) -> Self {
        Self {
            fs,
            root: normalize(root),
            default_chart,
        }
    }

    pub fn assemble(&self, explicit: &[FolderSpec], use_convention_defaults: bool) -> Vec<DeployUnit> {
        if !explicit.is_empty() {
            return explicit
                .iter()
                .enumerate()
                .map(|(position, spec)| self.unit_from(spec, position as i64))
                .collect();
        }

        if !use_convention_defaults {
            return Vec::new();
        }

        CONVENTION_FOLDERS
            .iter()
            .filter_map(|convention| {
                let path = self.folder_path(convention.name);
                if !self.fs.exists(&path) {
                    debug!("conventional folder {} not present", path.display());
                    return None;
                }

                Some(DeployUnit {
                    helm_chart: self.inherit_chart(convention.render_engine, None),
                    path,
                    render_engine: convention.render_engine,
                    order: Some(convention.order),
                })
            })
            .collect()
    }

    pub fn merge_overlays(
        &self,
        mut dest: Vec<DeployUnit>,
        overlays: &[MergeFolder],
    ) -> KubeDeployResult<Vec<DeployUnit>> {
        for (index, overlay) in overlays.iter().enumerate() {
            if let Some(order) = overlay.order {
                dest.push(self.unit_from(&overlay.folder(), order));
                continue;
            }

            let Some(instead_of) = overlay.replaces() else {
                return Err(KubeDeployError::InvalidMergeFolder { index });
            };

            let search_path = self.folder_path(instead_of);
            let mut found = false;

            for unit in dest.iter_mut().filter(|u| normalize(&u.path) == search_path) {
                debug!(
                    "replacing {} render engine {} with {}",
                    unit.path.display(),
                    unit.render_engine,
                    overlay.render_engine
                );
                unit.render_engine = overlay.render_engine;
                unit.helm_chart =
                    self.inherit_chart(overlay.render_engine, overlay.helm_chart.clone());
                found = true;
            }

            if !found {
                return Err(KubeDeployError::ReferencedPathNotFound { path: search_path });
            }
        }

        Ok(dest)
    }

    fn unit_from(&self, spec: &FolderSpec, default_order: i64) -> DeployUnit {
        DeployUnit {
            path: self.folder_path(&spec.path),
            render_engine: spec.render_engine,
            order: Some(spec.order.unwrap_or(default_order)),
            helm_chart: self.inherit_chart(spec.render_engine, spec.helm_chart.clone()),
        }
    }

    fn inherit_chart(&self, engine: RenderEngine, chart: Option<HelmChart>) -> Option<HelmChart> {
        match chart {
            Some(chart) => Some(chart),
            None if engine == RenderEngine::Helm => self.default_chart.cloned(),
            None => None,
        }
    }

    fn folder_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        normalize(&self.root.join(relative))
    }
}
