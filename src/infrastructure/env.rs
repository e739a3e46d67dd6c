//! Process environment
//!
//! Two directions: [`EnvConfig`] reads the tool's own settings from the
//! process environment, and [`RunEnv`] is the explicit environment handed
//! to every subprocess. The process environment itself is never mutated.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::application::deploy::{SecretKey, DEFAULT_KEYRING_DIR};

pub const KUBECONFIG_VAR: &str = "KUBECONFIG";
pub const NAMESPACE_VAR: &str = "NAMESPACE";

/// Settings taken from environment variables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvConfig {
    /// `KUBE_DEPLOY_METADATA_FILE`
    pub metadata_file: Option<PathBuf>,
    /// `KUBE_DEPLOY_GLOBAL_VARS`
    pub global_vars_file: Option<PathBuf>,
    /// `EJSON_KEY`
    pub ejson_key: Option<String>,
    /// `EJSON_KEY_PATH`
    pub ejson_key_path: Option<PathBuf>,
    /// `EJSON_KEYDIR`
    pub ejson_keydir: Option<PathBuf>,
    /// `KUBE_CONFIG`
    pub kube_config: Option<String>,
}

impl EnvConfig {
    pub fn from_process() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary lookup; blank values count as unset
    pub fn from_lookup(get_env: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| get_env(key).filter(|v| !v.trim().is_empty());

        Self {
            metadata_file: get("KUBE_DEPLOY_METADATA_FILE").map(PathBuf::from),
            global_vars_file: get("KUBE_DEPLOY_GLOBAL_VARS").map(PathBuf::from),
            ejson_key: get("EJSON_KEY"),
            ejson_key_path: get("EJSON_KEY_PATH").map(PathBuf::from),
            ejson_keydir: get("EJSON_KEYDIR").map(PathBuf::from),
            kube_config: get("KUBE_CONFIG"),
        }
    }

    pub fn secret_key(&self) -> SecretKey {
        SecretKey::from_sources(self.ejson_key.clone(), self.ejson_key_path.clone())
    }

    pub fn keyring_dir(&self) -> PathBuf {
        self.ejson_keydir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_KEYRING_DIR))
    }
}

/// Environment of every subprocess started during a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunEnv {
    vars: BTreeMap<String, String>,
    kubeconfig: Option<PathBuf>,
}

impl RunEnv {
    /// Plan vars plus `KUBECONFIG` and `NAMESPACE`; the latter two win
    pub fn new(vars: &BTreeMap<String, String>, kubeconfig: Option<&Path>, namespace: &str) -> Self {
        let mut vars = vars.clone();
        vars.insert(NAMESPACE_VAR.to_string(), namespace.to_string());
        vars.remove(KUBECONFIG_VAR);
        if let Some(path) = kubeconfig {
            vars.insert(KUBECONFIG_VAR.to_string(), path.display().to_string());
        }

        Self {
            vars,
            kubeconfig: kubeconfig.map(Path::to_path_buf),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn kubeconfig(&self) -> Option<&Path> {
        self.kubeconfig.as_deref()
    }

    /// Run environment first, then the process environment
    pub fn lookup(&self, name: &str) -> Option<String> {
        self.get(name)
            .map(str::to_string)
            .or_else(|| std::env::var(name).ok())
    }

    /// Set the run environment on `cmd`
    ///
    /// Without a kubeconfig an inherited `KUBECONFIG` is removed so tools
    /// fall back to in-cluster credentials.
    pub fn apply(&self, cmd: &mut Command) {
        cmd.envs(&self.vars);
        if self.kubeconfig.is_none() {
            cmd.env_remove(KUBECONFIG_VAR);
        }
    }
}
