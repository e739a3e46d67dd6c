//! Helm chart reference

use serde::{Deserialize, Serialize};

/// A helm chart to release from a deploy unit
///
/// A chart is addressed either by local `path` or by `repo` + `name`;
/// `path` wins when both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HelmChart {
    /// Chart repository, a URL or an already registered repo name
    #[serde(alias = "Repo", skip_serializing_if = "String::is_empty")]
    pub repo: String,

    /// Chart name inside the repository
    #[serde(alias = "Name", skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Local chart path (relative paths resolve against the unit folder)
    #[serde(alias = "Path", skip_serializing_if = "String::is_empty")]
    pub path: String,

    #[serde(alias = "Version", skip_serializing_if = "String::is_empty")]
    pub version: String,

    #[serde(alias = "ReleaseName", skip_serializing_if = "String::is_empty")]
    pub release_name: String,

    /// Values files relative to the unit folder; empty means every file in the folder
    #[serde(alias = "ValuesFiles", skip_serializing_if = "Vec::is_empty")]
    pub values_files: Vec<String>,

    #[serde(alias = "PostRenderer", skip_serializing_if = "String::is_empty")]
    pub post_renderer: String,
}

impl HelmChart {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = repo.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_release_name(mut self, release_name: impl Into<String>) -> Self {
        self.release_name = release_name.into();
        self
    }

    pub fn with_values_files(mut self, files: Vec<String>) -> Self {
        self.values_files = files;
        self
    }

    pub fn with_post_renderer(mut self, post_renderer: impl Into<String>) -> Self {
        self.post_renderer = post_renderer.into();
        self
    }

    /// Whether the chart is addressed through a repository
    pub fn uses_repo(&self) -> bool {
        self.path.is_empty() && !self.repo.is_empty()
    }

    /// Chart reference passed to `helm upgrade`
    ///
    /// `repo_name` is the name under which `repo` is registered with helm.
    pub fn chart_ref(&self, repo_name: Option<&str>) -> String {
        if !self.path.is_empty() {
            return self.path.clone();
        }

        match repo_name {
            Some(repo) if !self.repo.is_empty() => format!("{}/{}", repo, self.name),
            _ => self.name.clone(),
        }
    }
}
