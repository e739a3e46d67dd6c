//! Helm Repo Alias Value Object
//!
//! Name under which a chart repository URL is registered with helm.
//! Derived from the URL content so repeated runs reuse one registration.

use std::fmt;

use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoAlias(String);

impl RepoAlias {
    /// Deterministic alias for a repository URL (hex SHA-256 of the URL)
    pub fn for_url(url: &str) -> Self {
        let digest = Sha256::digest(url.as_bytes());
        Self(format!("{:x}", digest))
    }

    /// Wrap an alias that helm already knows about
    pub fn existing(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
