//! Working copy
//!
//! Each run deploys from a private temporary copy of the config folder with
//! variable references expanded. Secret files are removed from this copy,
//! never from the source.

use std::path::Path;

use tempfile::TempDir;
use tracing::debug;

use super::fs::LocalFs;
use crate::domain::ports::FileSystem;
use crate::domain::services::expand;
use crate::error::KubeDeployResult;

#[derive(Debug)]
pub struct Workspace {
    // keeps the directory alive; removed on drop
    _dir: TempDir,
    fs: LocalFs,
}

impl Workspace {
    /// Copy `config_folder` of `source` into a fresh temporary directory
    ///
    /// Paths keep their position relative to the source root. UTF-8 files
    /// are expanded with `lookup`; anything else is copied byte for byte.
    pub fn prepare<F>(
        source: &dyn FileSystem,
        config_folder: &Path,
        lookup: F,
    ) -> KubeDeployResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dir = tempfile::Builder::new().prefix("kube-deploy").tempdir()?;
        debug!("working copy at {}", dir.path().display());

        // empty folders must survive the copy, the driver probes them
        for folder in source.list_dirs(config_folder)? {
            std::fs::create_dir_all(dir.path().join(folder))?;
        }

        for file in source.list_files(config_folder)? {
            let bytes = source.read(&file)?;
            let content = match String::from_utf8(bytes) {
                Ok(text) => expand(&text, &lookup).into_bytes(),
                Err(raw) => raw.into_bytes(),
            };

            let dest = dir.path().join(&file);
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&dest, content)?;
        }

        let fs = LocalFs::new(dir.path());
        Ok(Self { _dir: dir, fs })
    }

    pub fn fs(&self) -> &LocalFs {
        &self.fs
    }

    pub fn root(&self) -> &Path {
        self.fs.root()
    }
}
