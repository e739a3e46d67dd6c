//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --verbose) are inherited by all subcommands
//! - Source flags fall back to `KUBE_DEPLOY_*` environment variables so the
//!   tool can be configured entirely from a CI job's environment

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// kube-deploy - declarative deployment driver for Kubernetes
#[derive(Parser, Debug)]
#[command(name = "kube-deploy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the plan and apply every folder to the cluster
    Deploy {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Resolve and print the plan without touching the cluster
    Plan {
        #[command(flatten)]
        source: SourceArgs,
    },
}

/// Where the config lives and what to deploy
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SourceArgs {
    /// Folder holding metadata.yml and the deploy folders
    #[arg(
        long,
        alias = "configFolder",
        env = "KUBE_DEPLOY_CONFIG_FOLDER",
        value_name = "DIR"
    )]
    pub config_folder: PathBuf,

    /// Git repository to clone the config folder from
    #[arg(
        long,
        alias = "configRepo",
        env = "KUBE_DEPLOY_CONFIG_REPO",
        value_name = "URL"
    )]
    pub config_repo: Option<String>,

    /// Target from metadata.yml to deploy
    #[arg(long, env = "KUBE_DEPLOY_TARGET")]
    pub target: Option<String>,

    /// Namespace to use when the metadata does not set one
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Path to a kubeconfig file
    #[arg(long, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Environment variable holding a base64 encoded kubeconfig
    #[arg(long, value_name = "VAR")]
    pub kubeconfig_env: Option<String>,
}

impl Commands {
    pub fn source(&self) -> &SourceArgs {
        match self {
            Commands::Deploy { source } | Commands::Plan { source } => source,
        }
    }
}
