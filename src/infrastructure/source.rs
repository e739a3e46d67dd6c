//! Config source
//!
//! The read-only tree holding the deployment configuration: a local folder
//! (rooted at its enclosing git repository so repo-level `global_vars.yml`
//! is visible) or a shallow clone held in memory.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use tracing::{debug, info};
use walkdir::WalkDir;

use super::fs::{LocalFs, MemoryFs};
use super::process;
use crate::domain::ports::{normalize, FileSystem, FsError};
use crate::error::{KubeDeployError, KubeDeployResult};

pub struct ConfigSource {
    fs: Box<dyn FileSystem>,
    config_folder: PathBuf,
}

impl std::fmt::Debug for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigSource")
            .field("config_folder", &self.config_folder)
            .finish_non_exhaustive()
    }
}

impl ConfigSource {
    /// Open `config_folder` locally, or inside `repo` when one is given
    pub fn open(config_folder: &Path, repo: Option<&str>) -> KubeDeployResult<Self> {
        match repo.filter(|r| !r.trim().is_empty()) {
            Some(repo) => Self::clone_repo(repo, config_folder),
            None => Self::local(config_folder),
        }
    }

    pub fn local(config_folder: &Path) -> KubeDeployResult<Self> {
        let not_found = || KubeDeployError::ConfigFolderNotFound {
            path: config_folder.to_path_buf(),
        };
        if !config_folder.is_dir() {
            return Err(not_found());
        }

        let absolute = std::fs::canonicalize(config_folder).map_err(|_| not_found())?;
        let root = find_git_root(&absolute).unwrap_or_else(|| absolute.clone());
        let relative = absolute
            .strip_prefix(&root)
            .map(Path::to_path_buf)
            .unwrap_or_default();
        debug!(
            "config source root {}, config folder {}",
            root.display(),
            relative.display()
        );

        Ok(Self {
            fs: Box::new(LocalFs::new(root)),
            config_folder: relative,
        })
    }

    /// Shallow-clone `repo` and load it into memory; the clone is discarded
    pub fn clone_repo(repo: &str, config_folder: &Path) -> KubeDeployResult<Self> {
        info!("cloning config repo {}", repo);
        let checkout = TempDir::new()?;

        let mut cmd = Command::new("git");
        cmd.args(["clone", "--depth", "1", "--quiet", repo])
            .arg(checkout.path());
        process::run(&mut cmd, None).map_err(|e| KubeDeployError::GitClone {
            repo: repo.to_string(),
            message: e.to_string(),
        })?;

        let fs = load_tree(checkout.path())?;
        Self::in_memory(fs, config_folder)
    }

    /// Config folder inside an already loaded tree
    pub fn in_memory(fs: MemoryFs, config_folder: &Path) -> KubeDeployResult<Self> {
        let relative = normalize(&strip_root(config_folder));
        if !fs.is_dir(&relative) {
            return Err(KubeDeployError::ConfigFolderNotFound {
                path: config_folder.to_path_buf(),
            });
        }
        Ok(Self {
            fs: Box::new(fs),
            config_folder: relative,
        })
    }

    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    /// Config folder relative to the source root
    pub fn config_folder(&self) -> &Path {
        &self.config_folder
    }
}

/// Nearest ancestor of `dir` (inclusive) holding a `.git` entry
pub fn find_git_root(dir: &Path) -> Option<PathBuf> {
    dir.ancestors()
        .find(|candidate| candidate.join(".git").exists())
        .map(Path::to_path_buf)
}

fn strip_root(path: &Path) -> PathBuf {
    path.strip_prefix("/").unwrap_or(path).to_path_buf()
}

/// Load every file below `dir` except git metadata
fn load_tree(dir: &Path) -> KubeDeployResult<MemoryFs> {
    let fs = MemoryFs::new();
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git");

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            match e.into_io_error() {
                Some(io) => FsError::io(path, io),
                None => FsError::Other(format!("filesystem loop below {}", path.display())),
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
        fs.insert(relative, std::fs::read(entry.path())?);
    }
    Ok(fs)
}
