//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::sync::Arc;

use crate::application::{DeployOptions, DeployUseCase};
use crate::domain::entities::EffectiveConfig;
use crate::domain::ports::DeployEventSink;
use crate::domain::services::ConfigMerger;
use crate::error::KubeDeployResult;
use crate::infrastructure::{
    CommandCluster, ConfigSource, EjsonDecryptor, EnvConfig, JsonEventSink, LocalFs, RunEnv,
    TracingEventSink,
};
use crate::presentation::cli::SourceArgs;

/// Type alias for the concrete DeployUseCase with all dependencies
pub type ConcreteDeployUseCase<'a> = DeployUseCase<CommandCluster, EjsonDecryptor, &'a LocalFs>;

/// Open the config source named by the CLI
pub fn open_source(args: &SourceArgs) -> KubeDeployResult<ConfigSource> {
    ConfigSource::open(&args.config_folder, args.config_repo.as_deref())
}

/// Resolve the effective config of a run
///
/// `--namespace` seeds the plan and only applies when the metadata leaves
/// the namespace unset. Units come back sorted.
pub fn resolve_plan(
    source: &ConfigSource,
    args: &SourceArgs,
    env: &EnvConfig,
) -> KubeDeployResult<EffectiveConfig> {
    let start = EffectiveConfig::default().with_namespace(args.namespace.clone().unwrap_or_default());

    let mut plan = ConfigMerger::new(source.fs())
        .with_metadata_file(env.metadata_file.clone())
        .with_global_vars_file(env.global_vars_file.clone())
        .resolve(source.config_folder(), args.target.as_deref(), start)?;
    plan.sort_units();
    Ok(plan)
}

/// Create a deploy use case running against the working copy `fs`
pub fn create_deploy_use_case<'a>(
    fs: &'a LocalFs,
    run_env: RunEnv,
    env: &EnvConfig,
) -> ConcreteDeployUseCase<'a> {
    let options = DeployOptions::new()
        .with_keyring_dir(env.keyring_dir())
        .with_secret_key(env.secret_key());

    DeployUseCase::new(
        CommandCluster::new(run_env.clone()),
        EjsonDecryptor::new(run_env),
        fs,
        options,
    )
}

/// Event sink for the selected output mode
pub fn event_sink(json: bool) -> Arc<dyn DeployEventSink> {
    if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(TracingEventSink)
    }
}
