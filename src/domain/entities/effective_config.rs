//! Effective config - the resolved, ready-to-execute deployment plan

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Bastion, DeployUnit, HelmChart};
use crate::domain::value_objects::RenderEngine;
use crate::error::{KubeDeployError, KubeDeployResult};

/// Fully merged deployment plan
///
/// Built once per run. The only mutation after resolution is
/// [`EffectiveConfig::sort_units`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
    pub namespace: String,

    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub release_name: String,

    pub units: Vec<DeployUnit>,

    pub vars: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub helm_chart: Option<HelmChart>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bastion: Option<Bastion>,
}

impl EffectiveConfig {
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_units(mut self, units: Vec<DeployUnit>) -> Self {
        self.units = units;
        self
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Merge `self` over `lower`, field by field.
    ///
    /// - strings: non-empty wins
    /// - options: `Some` wins
    /// - unit list: non-empty wins; an empty list never erases `lower`
    /// - vars: key-wise union, `self` wins on conflicts
    pub fn merge_over(self, lower: EffectiveConfig) -> EffectiveConfig {
        let mut vars = lower.vars;
        vars.extend(self.vars);

        EffectiveConfig {
            namespace: non_empty_or(self.namespace, lower.namespace),
            release_name: non_empty_or(self.release_name, lower.release_name),
            units: if self.units.is_empty() {
                lower.units
            } else {
                self.units
            },
            vars,
            helm_chart: self.helm_chart.or(lower.helm_chart),
            bastion: self.bastion.or(lower.bastion),
        }
    }

    /// Give helm units without a chart the plan's default chart
    pub fn inherit_helm_chart(&mut self) {
        let Some(chart) = &self.helm_chart else {
            return;
        };
        for unit in &mut self.units {
            if unit.render_engine == RenderEngine::Helm && unit.helm_chart.is_none() {
                unit.helm_chart = Some(chart.clone());
            }
        }
    }

    /// Stable sort by order; ties keep declaration order
    pub fn sort_units(&mut self) {
        self.units.sort_by_key(DeployUnit::order_key);
    }

    /// Reject plans that can only fail once cluster mutation has started
    pub fn validate(&self) -> KubeDeployResult<()> {
        for unit in &self.units {
            if unit.render_engine == RenderEngine::Helm && unit.helm_chart.is_none() {
                return Err(KubeDeployError::MissingHelmChart {
                    path: unit.path.clone(),
                });
            }
        }
        Ok(())
    }
}

fn non_empty_or(preferred: String, fallback: String) -> String {
    if preferred.is_empty() {
        fallback
    } else {
        preferred
    }
}
