//! Deploy Use Case
//!
//! Drives a resolved plan against the cluster:
//! 1. Create the namespace (fatal on failure)
//! 2. Sort units by order (stable)
//! 3. For each unit: probe the folder, resolve the render engine, dispatch
//!
//! A missing unit folder ends the run successfully. The first dispatch
//! error aborts the run; units already applied are not rolled back.

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};

use crate::domain::entities::{DeployUnit, EffectiveConfig, HelmChart};
use crate::domain::ports::{
    namespace_manifest, Cluster, DeployEvent, DeployEventSink, FileSystem, NoopEventSink,
    SecretDecryptor,
};
use crate::domain::services::render_engine_resolver;
use crate::domain::value_objects::Renderer;
use crate::error::{KubeDeployError, KubeDeployResult};

use super::helm;
use super::options::DeployOptions;
use super::result::DeployReport;
use super::secrets::SecretInjector;

/// Deploy use case - runs an [`EffectiveConfig`] through external tooling
///
/// `fs` is the run's working copy; unit paths are relative to it.
pub struct DeployUseCase<C, D, F>
where
    C: Cluster,
    D: SecretDecryptor,
    F: FileSystem,
{
    cluster: C,
    decryptor: D,
    fs: F,
    options: DeployOptions,
}

impl<C, D, F> DeployUseCase<C, D, F>
where
    C: Cluster,
    D: SecretDecryptor,
    F: FileSystem,
{
    pub fn new(cluster: C, decryptor: D, fs: F, options: DeployOptions) -> Self {
        Self {
            cluster,
            decryptor,
            fs,
            options,
        }
    }

    /// Run the plan without event reporting
    pub fn run(&self, config: &EffectiveConfig) -> KubeDeployResult<DeployReport> {
        self.run_with_events(config, Arc::new(NoopEventSink))
    }

    /// Run the plan, reporting progress to `events`
    pub fn run_with_events(
        &self,
        config: &EffectiveConfig,
        events: Arc<dyn DeployEventSink>,
    ) -> KubeDeployResult<DeployReport> {
        let result = self.execute(config, events.as_ref());

        match &result {
            Ok(report) => events.on_event(DeployEvent::Completed {
                applied_count: report.applied.len(),
            }),
            Err(err) => {
                error!("{}", err);
                events.on_event(DeployEvent::Failed {
                    error: err.to_string(),
                });
            }
        }

        result
    }

    fn execute(
        &self,
        config: &EffectiveConfig,
        events: &dyn DeployEventSink,
    ) -> KubeDeployResult<DeployReport> {
        if config.namespace.trim().is_empty() {
            return Err(KubeDeployError::MissingNamespace);
        }
        config.validate()?;

        let mut plan = config.clone();
        plan.sort_units();

        events.on_event(DeployEvent::Started {
            namespace: plan.namespace.clone(),
            unit_count: plan.units.len(),
        });

        self.create_namespace(&plan.namespace)?;
        events.on_event(DeployEvent::NamespaceReady {
            namespace: plan.namespace.clone(),
        });

        let injector = SecretInjector::new(
            &self.cluster,
            &self.decryptor,
            &self.fs,
            &self.options.keyring_dir,
            &self.options.secret_key,
            events,
        );
        let mut report = DeployReport::new();

        for (index, unit) in plan.units.iter().enumerate() {
            if !self.fs.exists(&unit.path) {
                info!("folder {} not found", unit.path.display());
                events.on_event(DeployEvent::FolderMissing {
                    index,
                    path: unit.path.clone(),
                });
                report.stopped_at = Some(unit.path.clone());
                break;
            }

            let renderer = render_engine_resolver::resolve(unit, &self.fs)
                .map_err(|err| err.in_unit(&unit.path))?;

            info!(
                "deploying folder {} using {} as the render engine",
                unit.path.display(),
                renderer.engine()
            );
            events.on_event(DeployEvent::UnitStarted {
                index,
                path: unit.path.clone(),
                order: unit.order_key(),
                engine: renderer.engine(),
            });

            self.dispatch(&plan, unit, renderer, &injector, &mut report)
                .map_err(|err| err.in_unit(&unit.path))?;

            report.applied.push(unit.path.clone());
            events.on_event(DeployEvent::UnitApplied {
                index,
                path: unit.path.clone(),
            });
        }

        Ok(report)
    }

    fn create_namespace(&self, namespace: &str) -> KubeDeployResult<()> {
        info!("creating namespace {}", namespace);

        self.cluster
            .apply(&namespace_manifest(namespace))
            .map_err(|err| KubeDeployError::Namespace {
                namespace: namespace.to_string(),
                source: Box::new(err),
            })
    }

    fn dispatch(
        &self,
        plan: &EffectiveConfig,
        unit: &DeployUnit,
        renderer: Renderer<'_>,
        injector: &SecretInjector<'_, C, D, F>,
        report: &mut DeployReport,
    ) -> KubeDeployResult<()> {
        match renderer {
            Renderer::Helm(chart) => self.release_helm(plan, unit, chart),
            Renderer::Kustomize => self.apply_folder(plan, unit, &["-k"], injector, report),
            Renderer::Manifests => self.apply_folder(plan, unit, &["-R", "-f"], injector, report),
        }
    }

    fn release_helm(
        &self,
        plan: &EffectiveConfig,
        unit: &DeployUnit,
        chart: &HelmChart,
    ) -> KubeDeployResult<()> {
        let release = helm::release_name(chart, &plan.release_name, &unit.path)?;
        info!(
            "deploying helm chart {} with release {} into {}",
            chart.name, release, plan.namespace
        );

        let repo = if chart.uses_repo() {
            Some(helm::ensure_repo(&self.cluster, &chart.repo)?)
        } else {
            None
        };

        let values_files = helm::values_files(chart, &unit.path, &self.fs)?;
        let args = helm::release_args(
            chart,
            repo.as_ref(),
            &plan.namespace,
            &release,
            &values_files,
        );

        self.cluster.helm(&args, Some(&self.fs.resolve(&unit.path)))
    }

    fn apply_folder(
        &self,
        plan: &EffectiveConfig,
        unit: &DeployUnit,
        apply_flags: &[&str],
        injector: &SecretInjector<'_, C, D, F>,
        report: &mut DeployReport,
    ) -> KubeDeployResult<()> {
        let outcome = injector.inject_and_strip(&plan.namespace, &unit.path)?;
        report.secrets_applied.extend(outcome.applied);
        report.secrets_skipped.extend(outcome.skipped);

        if self.is_empty_folder(&unit.path)? {
            info!(
                "{} is empty after removing secrets, nothing to apply",
                unit.path.display()
            );
            return Ok(());
        }

        let mut args = vec!["apply".to_string()];
        args.extend(apply_flags.iter().map(|flag| flag.to_string()));
        args.push(self.fs.resolve(&unit.path).to_string_lossy().into_owned());

        self.cluster.kubectl(&args)
    }

    fn is_empty_folder(&self, path: &Path) -> KubeDeployResult<bool> {
        if !self.fs.exists(path) {
            return Ok(true);
        }
        Ok(self.fs.list_files(path)?.is_empty())
    }
}
