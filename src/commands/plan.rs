//! Plan command: print the resolved plan as JSON

use anyhow::{Context, Result};

use kube_deploy::infrastructure::EnvConfig;
use kube_deploy::presentation::cli::SourceArgs;
use kube_deploy::presentation::factory;

pub fn cmd_plan(args: &SourceArgs) -> Result<()> {
    let env = EnvConfig::from_process();
    let source = factory::open_source(args).context("failed to open config source")?;
    let plan = factory::resolve_plan(&source, args, &env).context("failed to resolve plan")?;

    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
