//! Deploy Options
//!
//! Configuration types for deploy runs.

use std::path::PathBuf;

use crate::error::{KubeDeployError, KubeDeployResult};

/// Keyring directory used by `ejson` when no key is given explicitly
pub const DEFAULT_KEYRING_DIR: &str = "/opt/ejson/keys";

/// Source of the ejson private key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SecretKey {
    /// Rely on the keyring directory only
    #[default]
    Keyring,
    /// Key material passed directly
    Inline(String),
    /// File holding the key material
    File(PathBuf),
}

impl SecretKey {
    /// Inline key wins over a key file; blank values count as unset
    pub fn from_sources(key: Option<String>, key_path: Option<PathBuf>) -> Self {
        match (key, key_path) {
            (Some(key), _) if !key.trim().is_empty() => Self::Inline(key),
            (_, Some(path)) if !path.as_os_str().is_empty() => Self::File(path),
            _ => Self::Keyring,
        }
    }

    /// Key material; empty when only the keyring should be used
    pub fn load(&self) -> KubeDeployResult<String> {
        match self {
            Self::Keyring => Ok(String::new()),
            Self::Inline(key) => Ok(key.trim().to_string()),
            Self::File(path) => std::fs::read_to_string(path)
                .map(|key| key.trim().to_string())
                .map_err(|source| KubeDeployError::SecretKey {
                    path: path.clone(),
                    source,
                }),
        }
    }
}

/// Options for the deploy use case
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// ejson keyring directory
    pub keyring_dir: PathBuf,
    /// ejson private key source
    pub secret_key: SecretKey,
}

impl DeployOptions {
    pub fn new() -> Self {
        Self {
            keyring_dir: PathBuf::from(DEFAULT_KEYRING_DIR),
            secret_key: SecretKey::Keyring,
        }
    }

    pub fn with_keyring_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.keyring_dir = dir.into();
        self
    }

    pub fn with_secret_key(mut self, key: SecretKey) -> Self {
        self.secret_key = key;
        self
    }
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self::new()
    }
}
