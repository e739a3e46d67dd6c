//! Local File System Implementation
//!
//! Implements the FileSystem port for a directory on disk. Relative paths
//! are resolved against the root; absolute paths are used as-is.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// Directory-rooted local file system
#[derive(Debug, Clone)]
pub struct LocalFs {
    root: PathBuf,
}

impl LocalFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Entries below `dir` accepted by `keep`, as `dir`-prefixed paths
    fn walk(&self, dir: &Path, keep: impl Fn(&DirEntry) -> bool) -> FsResult<Vec<PathBuf>> {
        let base = self.full(dir);
        let mut paths = Vec::new();

        for entry in WalkDir::new(&base).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(base.as_path()).to_path_buf();
                match e.into_io_error() {
                    Some(io) => FsError::io(path, io),
                    None => FsError::Other(format!("filesystem loop below {}", path.display())),
                }
            })?;

            if !keep(&entry) {
                continue;
            }
            match entry.path().strip_prefix(&base) {
                Ok(relative) if relative.as_os_str().is_empty() => paths.push(dir.to_path_buf()),
                Ok(relative) => paths.push(dir.join(relative)),
                Err(_) => {}
            }
        }

        Ok(paths)
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        std::fs::read(self.full(path)).map_err(|e| FsError::io(path, e))
    }

    fn exists(&self, path: &Path) -> bool {
        self.full(path).exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.full(path).is_dir()
    }

    fn list_files(&self, dir: &Path) -> FsResult<Vec<PathBuf>> {
        self.walk(dir, |entry| entry.file_type().is_file())
    }

    fn list_dirs(&self, dir: &Path) -> FsResult<Vec<PathBuf>> {
        self.walk(dir, |entry| entry.file_type().is_dir())
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        std::fs::remove_file(self.full(path)).map_err(|e| FsError::io(path, e))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.full(path)
    }
}
