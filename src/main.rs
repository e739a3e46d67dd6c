//! kube-deploy CLI
//!
//! Usage: kube-deploy <COMMAND>
//!
//! Commands:
//!   deploy  Resolve the plan and apply every folder to the cluster
//!   plan    Resolve and print the plan without touching the cluster

use anyhow::Result;
use clap::Parser;

use kube_deploy::presentation::cli::{Cli, Commands};
use kube_deploy::presentation::logging;

mod commands;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match &cli.command {
        Commands::Deploy { source } => commands::deploy::cmd_deploy(source, cli.json),
        Commands::Plan { source } => commands::plan::cmd_plan(source),
    }
}
