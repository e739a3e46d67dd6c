//! Deploy Result
//!
//! Summary of a completed deploy run.

use std::path::PathBuf;

/// Outcome of a successful deploy run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployReport {
    /// Units applied, in execution order
    pub applied: Vec<PathBuf>,
    /// ejson files turned into cluster secrets
    pub secrets_applied: Vec<PathBuf>,
    /// ejson files skipped as invalid
    pub secrets_skipped: Vec<PathBuf>,
    /// Missing unit folder that ended the run early
    pub stopped_at: Option<PathBuf>,
}

impl DeployReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every unit of the plan was applied
    pub fn is_complete(&self) -> bool {
        self.stopped_at.is_none()
    }
}
