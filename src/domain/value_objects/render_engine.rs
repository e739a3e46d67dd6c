//! Render Engine Value Object
//!
//! How a folder is turned into cluster resources.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::entities::HelmChart;

/// Declared render engine of a deploy unit
///
/// `Auto` is only ever a declaration; resolution always produces one of
/// the concrete engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderEngine {
    #[default]
    Auto,
    None,
    Helm,
    Kustomize,
}

impl RenderEngine {
    /// All render engines
    pub const ALL: [RenderEngine; 4] = [Self::Auto, Self::None, Self::Helm, Self::Kustomize];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::None => "none",
            Self::Helm => "helm",
            Self::Kustomize => "kustomize",
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl fmt::Display for RenderEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown render engine name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{value} is not a valid render engine, try [auto, none, helm, kustomize]")]
pub struct ParseRenderEngineError {
    pub value: String,
}

impl FromStr for RenderEngine {
    type Err = ParseRenderEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::Auto);
        }

        Self::ALL
            .into_iter()
            .find(|engine| engine.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseRenderEngineError {
                value: s.to_string(),
            })
    }
}

impl Serialize for RenderEngine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RenderEngine {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // a key with no value means auto
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => raw.parse().map_err(serde::de::Error::custom),
            None => Ok(Self::Auto),
        }
    }
}

/// Resolved render strategy for one deploy unit
///
/// Closed set of concrete strategies; the helm variant carries the chart
/// it will release so the dispatch site cannot lose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renderer<'a> {
    /// Recursive plain manifest apply
    Manifests,
    /// Helm upgrade --install of the given chart
    Helm(&'a HelmChart),
    /// kubectl apply -k
    Kustomize,
}

impl Renderer<'_> {
    pub fn engine(&self) -> RenderEngine {
        match self {
            Self::Manifests => RenderEngine::None,
            Self::Helm(_) => RenderEngine::Helm,
            Self::Kustomize => RenderEngine::Kustomize,
        }
    }
}
