//! FileSystem port - abstraction over file I/O operations
//!
//! Used for both the read-only config source (local directory or a cloned
//! repository held in memory) and the private working copy of a run.
//! Paths are relative to the file system root unless absolute.

use std::path::{Component, Path, PathBuf};

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug)]
pub enum FsError {
    /// File not found
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// I/O error
    Io(PathBuf, std::io::Error),
    /// Other error
    Other(String),
}

impl FsError {
    /// Classify an I/O error for the given path
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path),
            _ => FsError::Io(path, err),
        }
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            FsError::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
            FsError::Io(path, err) => write!(f, "I/O error on {}: {}", path.display(), err),
            FsError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FsError::Io(_, err) => Some(err),
            _ => None,
        }
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - a directory on disk
/// - `MemoryFs` - an in-memory tree (cloned config repos, tests)
pub trait FileSystem {
    /// Read file content as bytes
    fn read(&self, path: &Path) -> FsResult<Vec<u8>>;

    /// Check if a file or directory exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if a directory exists
    fn is_dir(&self, path: &Path) -> bool;

    /// All files below `dir`, recursively, sorted, as `dir`-prefixed paths
    fn list_files(&self, dir: &Path) -> FsResult<Vec<PathBuf>>;

    /// `dir` and every directory below it, sorted, as `dir`-prefixed paths.
    /// Empty directories are included.
    fn list_dirs(&self, dir: &Path) -> FsResult<Vec<PathBuf>>;

    /// Remove a file
    fn remove(&self, path: &Path) -> FsResult<()>;

    /// Location of `path` as seen by external tools
    fn resolve(&self, path: &Path) -> PathBuf;

    /// Read file content as UTF-8
    fn read_to_string(&self, path: &Path) -> FsResult<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes)
            .map_err(|e| FsError::Other(format!("{} is not UTF-8: {}", path.display(), e)))
    }
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        (**self).read(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn list_files(&self, dir: &Path) -> FsResult<Vec<PathBuf>> {
        (**self).list_files(dir)
    }

    fn list_dirs(&self, dir: &Path) -> FsResult<Vec<PathBuf>> {
        (**self).list_dirs(dir)
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        (**self).remove(path)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        (**self).resolve(path)
    }
}

/// Lexically normalize a path: drop `.` and fold `..` where possible
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    out.pop();
                } else {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
