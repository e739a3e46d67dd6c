//! Cluster Port
//!
//! Every cluster mutation goes through external tooling (`kubectl`, `helm`).
//! Implementations run blocking subprocesses with the run environment.

use std::path::Path;

use serde::Deserialize;

use crate::error::KubeDeployResult;

/// A chart repository registered with helm
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HelmRepo {
    pub name: String,
    pub url: String,
}

pub trait Cluster {
    /// Apply a single resource manifest (`kubectl apply --wait -f -`)
    fn apply(&self, manifest: &serde_json::Value) -> KubeDeployResult<()>;

    /// Run `kubectl` with the given arguments
    fn kubectl(&self, args: &[String]) -> KubeDeployResult<()>;

    /// Run `helm` with the given arguments, optionally from `dir`
    fn helm(&self, args: &[String], dir: Option<&Path>) -> KubeDeployResult<()>;

    /// Repositories currently registered with helm
    fn helm_repos(&self) -> KubeDeployResult<Vec<HelmRepo>>;
}

impl<C: Cluster + ?Sized> Cluster for &C {
    fn apply(&self, manifest: &serde_json::Value) -> KubeDeployResult<()> {
        (**self).apply(manifest)
    }

    fn kubectl(&self, args: &[String]) -> KubeDeployResult<()> {
        (**self).kubectl(args)
    }

    fn helm(&self, args: &[String], dir: Option<&Path>) -> KubeDeployResult<()> {
        (**self).helm(args, dir)
    }

    fn helm_repos(&self) -> KubeDeployResult<Vec<HelmRepo>> {
        (**self).helm_repos()
    }
}

/// `v1/Namespace` manifest
pub fn namespace_manifest(name: &str) -> serde_json::Value {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": { "name": name },
    })
}
