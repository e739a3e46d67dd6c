//! Render-engine resolution
//!
//! Precedence for units declared `auto`:
//! 1. a helm chart is attached → helm
//! 2. the folder holds `kustomization.yaml` / `kustomization.yml` → kustomize
//! 3. otherwise → plain manifests
//!
//! Explicit declarations always win.

use crate::domain::entities::DeployUnit;
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::{RenderEngine, Renderer};
use crate::error::{KubeDeployError, KubeDeployResult};

pub const KUSTOMIZATION_FILES: [&str; 2] = ["kustomization.yaml", "kustomization.yml"];

/// Concrete engine for `unit`; never [`RenderEngine::Auto`]
pub fn resolve_engine<F: FileSystem + ?Sized>(unit: &DeployUnit, fs: &F) -> RenderEngine {
    if !unit.render_engine.is_auto() {
        return unit.render_engine;
    }

    if unit.helm_chart.is_some() {
        return RenderEngine::Helm;
    }

    let has_kustomization = KUSTOMIZATION_FILES
        .iter()
        .any(|name| fs.exists(&unit.path.join(name)));

    if has_kustomization {
        RenderEngine::Kustomize
    } else {
        RenderEngine::None
    }
}

/// Dispatch strategy for `unit`
pub fn resolve<'a, F: FileSystem + ?Sized>(
    unit: &'a DeployUnit,
    fs: &F,
) -> KubeDeployResult<Renderer<'a>> {
    match resolve_engine(unit, fs) {
        RenderEngine::Helm => unit
            .helm_chart
            .as_ref()
            .map(Renderer::Helm)
            .ok_or_else(|| KubeDeployError::MissingHelmChart {
                path: unit.path.clone(),
            }),
        RenderEngine::Kustomize => Ok(Renderer::Kustomize),
        RenderEngine::None | RenderEngine::Auto => Ok(Renderer::Manifests),
    }
}
