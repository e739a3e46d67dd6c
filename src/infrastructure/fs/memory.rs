//! In-memory File System
//!
//! Holds a cloned config repository (and test fixtures). Directories are
//! implicit: a directory exists while at least one file lives below it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::domain::ports::file_system::{normalize, FileSystem, FsError, FsResult};

#[derive(Debug, Default)]
pub struct MemoryFs {
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryFs::insert`]
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        self.lock().insert(normalize(path.as_ref()), content.into());
    }

    /// Every file path, sorted
    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<PathBuf, Vec<u8>>> {
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FileSystem for MemoryFs {
    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        self.lock()
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn exists(&self, path: &Path) -> bool {
        let path = normalize(path);
        self.lock().keys().any(|key| key.starts_with(&path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let path = normalize(path);
        self.lock()
            .keys()
            .any(|key| key != &path && key.starts_with(&path))
    }

    fn list_files(&self, dir: &Path) -> FsResult<Vec<PathBuf>> {
        let prefix = normalize(dir);
        let files: Vec<PathBuf> = self
            .lock()
            .keys()
            .filter(|key| *key != &prefix && key.starts_with(&prefix))
            .cloned()
            .collect();

        if files.is_empty() {
            return Err(FsError::NotFound(dir.to_path_buf()));
        }
        Ok(files)
    }

    fn list_dirs(&self, dir: &Path) -> FsResult<Vec<PathBuf>> {
        let prefix = normalize(dir);
        let mut dirs: Vec<PathBuf> = self
            .lock()
            .keys()
            .filter(|key| *key != &prefix && key.starts_with(&prefix))
            .flat_map(|key| key.ancestors().skip(1).map(Path::to_path_buf).collect::<Vec<_>>())
            .filter(|ancestor| ancestor.starts_with(&prefix))
            .collect();
        dirs.sort();
        dirs.dedup();

        if dirs.is_empty() {
            return Err(FsError::NotFound(dir.to_path_buf()));
        }
        Ok(dirs)
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        self.lock()
            .remove(&normalize(path))
            .map(|_| ())
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        normalize(path)
    }
}
