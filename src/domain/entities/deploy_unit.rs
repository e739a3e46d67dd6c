//! Deploy unit - one orderable folder to apply

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::HelmChart;
use crate::domain::value_objects::RenderEngine;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployUnit {
    /// Folder path relative to the config source root
    pub path: PathBuf,

    pub render_engine: RenderEngine,

    /// Position in the total execution order; unset sorts as 0
    pub order: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub helm_chart: Option<HelmChart>,
}

impl DeployUnit {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            render_engine: RenderEngine::Auto,
            order: None,
            helm_chart: None,
        }
    }

    pub fn with_render_engine(mut self, engine: RenderEngine) -> Self {
        self.render_engine = engine;
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_helm_chart(mut self, chart: HelmChart) -> Self {
        self.helm_chart = Some(chart);
        self
    }

    /// Sort key used by the driver
    pub fn order_key(&self) -> i64 {
        self.order.unwrap_or(0)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
