//! Helm release planning
//!
//! Repository registration and the `helm upgrade --install` argument vector.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::domain::entities::HelmChart;
use crate::domain::ports::{Cluster, FileSystem};
use crate::domain::value_objects::RepoAlias;
use crate::error::{KubeDeployError, KubeDeployResult};

/// Register `url` with helm unless a registration for it already exists
pub fn ensure_repo<C: Cluster + ?Sized>(cluster: &C, url: &str) -> KubeDeployResult<RepoAlias> {
    let repos = cluster.helm_repos().unwrap_or_else(|err| {
        debug!("unable to list helm repos: {}", err);
        Vec::new()
    });

    if let Some(existing) = repos.into_iter().find(|repo| repo.url == url) {
        info!("found existing helm repo {} with name {}", url, existing.name);
        return Ok(RepoAlias::existing(existing.name));
    }

    let alias = RepoAlias::for_url(url);
    info!("adding helm repo {} with name {}", url, alias);

    cluster.helm(&strings(["repo", "add", alias.as_str(), url]), None)?;
    cluster.helm(&strings(["repo", "update"]), None)?;

    Ok(alias)
}

/// Release name: the chart's, then the plan's, then the chart name
pub fn release_name(
    chart: &HelmChart,
    plan_release_name: &str,
    unit_path: &Path,
) -> KubeDeployResult<String> {
    [
        chart.release_name.as_str(),
        plan_release_name,
        chart.name.as_str(),
    ]
    .into_iter()
    .map(str::trim)
    .find(|name| !name.is_empty())
    .map(str::to_string)
    .ok_or_else(|| KubeDeployError::MissingReleaseName {
        path: unit_path.to_path_buf(),
    })
}

/// Values files for a release: the chart's list relative to the unit
/// folder, else every file in the folder
pub fn values_files<F: FileSystem + ?Sized>(
    chart: &HelmChart,
    unit_path: &Path,
    fs: &F,
) -> KubeDeployResult<Vec<PathBuf>> {
    let files = if chart.values_files.is_empty() {
        fs.list_files(unit_path)?
    } else {
        chart
            .values_files
            .iter()
            .map(|file| unit_path.join(file))
            .collect()
    };

    Ok(files.iter().map(|file| fs.resolve(file)).collect())
}

/// Arguments of `helm upgrade --install` for one release
pub fn release_args(
    chart: &HelmChart,
    repo: Option<&RepoAlias>,
    namespace: &str,
    release: &str,
    values_files: &[PathBuf],
) -> Vec<String> {
    let mut args = strings(["upgrade", "--wait", "--install"]);

    if !chart.version.is_empty() {
        args.extend(strings(["--version", chart.version.as_str()]));
    }

    args.extend(strings(["-n", namespace, release]));
    args.push(chart.chart_ref(repo.map(RepoAlias::as_str)));

    for file in values_files {
        args.push("-f".to_string());
        args.push(file.to_string_lossy().into_owned());
    }

    if !chart.post_renderer.is_empty() {
        args.extend(strings(["--post-renderer", chart.post_renderer.as_str()]));
    }

    args
}

fn strings<const N: usize>(parts: [&str; N]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}
