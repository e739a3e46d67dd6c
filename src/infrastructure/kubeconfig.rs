//! Kubeconfig resolution
//!
//! First hit wins:
//! 1. `KUBE_CONFIG` (with `~` and `$VAR` expanded) if the file exists
//! 2. `--kubeconfig` if the file exists
//! 3. base64 content of the variable named by `--kubeconfig-env`, written
//!    to a temporary file
//! 4. in-cluster service account mount, meaning no kubeconfig at all
//! 5. `~/.kube/config`

use std::io::Write;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tempfile::NamedTempFile;
use tracing::info;

use crate::domain::services::expand;
use crate::error::{KubeDeployError, KubeDeployResult};

pub const IN_CLUSTER_MOUNT: &str = "/var/run/secrets/kubernetes.io/serviceaccount";

/// A resolved kubeconfig; a temporary file is removed on drop
#[derive(Debug)]
pub enum Kubeconfig {
    File(PathBuf),
    Temp(NamedTempFile),
    InCluster,
}

impl Kubeconfig {
    /// Path to export as `KUBECONFIG`, `None` in-cluster
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Temp(file) => Some(file.path()),
            Self::InCluster => None,
        }
    }
}

/// Inputs to kubeconfig resolution
#[derive(Debug, Clone)]
pub struct KubeconfigSources {
    /// Raw `KUBE_CONFIG` value
    pub kube_config: Option<String>,
    /// `--kubeconfig`
    pub path: Option<PathBuf>,
    /// `--kubeconfig-env`
    pub env_var: Option<String>,
    pub in_cluster_mount: PathBuf,
    pub home: Option<PathBuf>,
}

impl Default for KubeconfigSources {
    fn default() -> Self {
        Self {
            kube_config: None,
            path: None,
            env_var: None,
            in_cluster_mount: PathBuf::from(IN_CLUSTER_MOUNT),
            home: dirs::home_dir(),
        }
    }
}

impl KubeconfigSources {
    pub fn resolve(&self) -> KubeDeployResult<Kubeconfig> {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    pub fn resolve_with(
        &self,
        get_env: impl Fn(&str) -> Option<String>,
    ) -> KubeDeployResult<Kubeconfig> {
        if let Some(raw) = self.kube_config.as_deref().filter(|v| !v.is_empty()) {
            let path = self.expand_path(raw, &get_env);
            if path.exists() {
                info!(
                    "using kube config defined in KUBE_CONFIG environment variable {}",
                    path.display()
                );
                return Ok(Kubeconfig::File(path));
            }
        }

        if let Some(path) = self.path.as_ref().filter(|p| p.exists()) {
            info!("using existing kube config found at {}", path.display());
            return Ok(Kubeconfig::File(path.clone()));
        }

        if let Some(var) = self.env_var.as_deref().filter(|v| !v.is_empty()) {
            if let Some(encoded) = get_env(var).filter(|v| !v.is_empty()) {
                info!("creating kube config from environment variable {}", var);
                return decode_to_temp(var, &encoded).map(Kubeconfig::Temp);
            }
        }

        if self.in_cluster_mount.exists() {
            info!("running in cluster, using in cluster service account kube api access");
            return Ok(Kubeconfig::InCluster);
        }

        if let Some(default) = self
            .home
            .as_ref()
            .map(|home| home.join(".kube").join("config"))
            .filter(|p| p.exists())
        {
            info!("using default user kube config from {}", default.display());
            return Ok(Kubeconfig::File(default));
        }

        Err(KubeDeployError::KubeconfigNotFound)
    }

    fn expand_path(&self, raw: &str, get_env: &impl Fn(&str) -> Option<String>) -> PathBuf {
        let expanded = expand(raw, get_env);
        match (expanded.strip_prefix('~'), &self.home) {
            (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
                home.join(rest.trim_start_matches('/'))
            }
            _ => PathBuf::from(expanded),
        }
    }
}

fn decode_to_temp(var: &str, encoded: &str) -> KubeDeployResult<NamedTempFile> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| KubeDeployError::KubeconfigDecode {
            var: var.to_string(),
            message: e.to_string(),
        })?;

    let mut file = tempfile::Builder::new()
        .prefix("kube-deploy-kubeconfig")
        .tempfile()?;
    file.write_all(&bytes)?;
    file.flush()?;
    Ok(file)
}
