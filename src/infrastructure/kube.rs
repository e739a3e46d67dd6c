//! Subprocess-backed cluster
//!
//! `kubectl` and `helm` are resolved from `PATH` and run with the run
//! environment and inherited stdio.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use super::env::RunEnv;
use super::process;
use crate::domain::ports::{Cluster, HelmRepo};
use crate::error::KubeDeployResult;

const KUBECTL: &str = "kubectl";
const HELM: &str = "helm";

/// `helm repo list` reports an empty list as an error with this message
const NO_REPOSITORIES: &str = "no repositories to show";

pub struct CommandCluster {
    env: RunEnv,
}

impl CommandCluster {
    pub fn new(env: RunEnv) -> Self {
        Self { env }
    }

    fn command(&self, program: &str) -> Command {
        let mut cmd = Command::new(program);
        self.env.apply(&mut cmd);
        cmd
    }
}

impl Cluster for CommandCluster {
    fn apply(&self, manifest: &serde_json::Value) -> KubeDeployResult<()> {
        let body = serde_json::to_vec(manifest)?;
        let mut cmd = self.command(KUBECTL);
        cmd.args(["apply", "--wait", "-f", "-"]);
        process::run(&mut cmd, Some(&body))
    }

    fn kubectl(&self, args: &[String]) -> KubeDeployResult<()> {
        let mut cmd = self.command(KUBECTL);
        cmd.args(args);
        process::run(&mut cmd, None)
    }

    fn helm(&self, args: &[String], dir: Option<&Path>) -> KubeDeployResult<()> {
        let mut cmd = self.command(HELM);
        cmd.args(args);
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }
        process::run(&mut cmd, None)
    }

    fn helm_repos(&self) -> KubeDeployResult<Vec<HelmRepo>> {
        let mut cmd = self.command(HELM);
        cmd.args(["repo", "list", "-o", "json"]);
        let output = process::capture(&mut cmd, None)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.contains(NO_REPOSITORIES) {
                debug!("helm repo list failed, assuming no repositories");
            }
            return Ok(Vec::new());
        }

        parse_repo_list(&output.stdout)
    }
}

fn parse_repo_list(stdout: &[u8]) -> KubeDeployResult<Vec<HelmRepo>> {
    if stdout.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_slice(stdout)?)
}
