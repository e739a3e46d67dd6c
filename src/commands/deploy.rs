//! Deploy command
//!
//! Wires a full run: source, plan, cluster credentials, working copy,
//! bastion tunnel, then the deploy use case. Temporary files and the tunnel
//! are released when their handles drop, on success and failure alike.

use anyhow::{Context, Result};
use tracing::{debug, info};

use kube_deploy::infrastructure::{EnvConfig, KubeconfigSources, RunEnv, Tunnel, Workspace};
use kube_deploy::presentation::cli::SourceArgs;
use kube_deploy::presentation::factory;

pub fn cmd_deploy(args: &SourceArgs, json: bool) -> Result<()> {
    let env = EnvConfig::from_process();

    let source = factory::open_source(args).context("failed to open config source")?;
    let plan = factory::resolve_plan(&source, args, &env).context("failed to resolve plan")?;
    debug!("using config {}", serde_json::to_string(&plan)?);

    let kubeconfig = KubeconfigSources {
        kube_config: env.kube_config.clone(),
        path: args.kubeconfig.clone(),
        env_var: args.kubeconfig_env.clone(),
        ..KubeconfigSources::default()
    }
    .resolve()?;

    let run_env = RunEnv::new(&plan.vars, kubeconfig.path(), &plan.namespace);
    let workspace = Workspace::prepare(source.fs(), source.config_folder(), |name| {
        run_env.lookup(name)
    })
    .context("failed to prepare working copy")?;

    let _tunnel = plan.bastion.as_ref().and_then(Tunnel::open);

    let use_case = factory::create_deploy_use_case(workspace.fs(), run_env, &env);
    let report = use_case.run_with_events(&plan, factory::event_sink(json))?;

    if let Some(path) = &report.stopped_at {
        info!("stopped at missing folder {}", path.display());
    }
    Ok(())
}
