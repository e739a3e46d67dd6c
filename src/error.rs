//! Error types for kube-deploy
//!
//! Uses `thiserror` for library errors. Every variant belongs to one of the
//! four failure classes reported by [`KubeDeployError::kind`].

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::FsError;

/// Result type alias for kube-deploy operations
pub type KubeDeployResult<T> = Result<T, KubeDeployError>;

/// Broad failure class of a [`KubeDeployError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or contradictory deployment configuration (always fatal, pre-flight)
    Configuration,
    /// Config source or cluster credentials could not be located (fatal, pre-flight)
    Source,
    /// A single secret file is invalid (logged and skipped)
    Secret,
    /// An external command or I/O operation failed (fatal, aborts remaining units)
    Execution,
}

/// Main error type for kube-deploy operations
#[derive(Error, Debug)]
pub enum KubeDeployError {
    /// Requested target is not declared in the metadata
    #[error("unable to find target {name} in target list")]
    TargetNotFound { name: String },

    /// Target declares both explicit folders and merge folders
    #[error("cannot set mergeFolders and folders in the same target {target}")]
    ConflictingFolders { target: String },

    /// Merge folder carries neither an order nor an insteadOf reference
    #[error("merge folder[{index}] must set order or insteadOf")]
    InvalidMergeFolder { index: usize },

    /// insteadOf reference does not match any folder of the base plan
    #[error("unable to find referenced path {}", path.display())]
    ReferencedPathNotFound { path: PathBuf },

    /// Unit uses the helm render engine but no chart is available
    #[error("helm chart can not be empty when helm render engine is set, found in {}", path.display())]
    MissingHelmChart { path: PathBuf },

    /// Plan has no namespace to deploy into
    #[error("namespace can not be empty")]
    MissingNamespace,

    /// No release name could be derived for a helm unit
    #[error("unable to determine helm release name for {}", path.display())]
    MissingReleaseName { path: PathBuf },

    /// A config file could not be parsed
    #[error("invalid config file {}: {message}", file.display())]
    InvalidConfig { file: PathBuf, message: String },

    /// Config folder is missing or not a directory
    #[error("config folder either doesn't exist or is not a directory: {}", path.display())]
    ConfigFolderNotFound { path: PathBuf },

    /// Config repository could not be cloned
    #[error("failed to clone config repo {repo}: {message}")]
    GitClone { repo: String, message: String },

    /// No kubeconfig could be located
    #[error("unable to detect kube config")]
    KubeconfigNotFound,

    /// Kubeconfig env variable does not carry valid base64
    #[error("failed to decode base64 encoded kube config from {var}: {message}")]
    KubeconfigDecode { var: String, message: String },

    /// Decrypted ejson payload is unusable (recoverable, file is skipped)
    #[error("ejson secret is invalid: {reason} in {}", file.display())]
    InvalidSecret { file: PathBuf, reason: String },

    /// ejson file is not valid JSON
    #[error("failed to parse ejson file {}: {source}", file.display())]
    SecretParse {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// ejson private key file could not be read
    #[error("failed to read ejson key from {}: {source}", path.display())]
    SecretKey {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// ejson decryption failed
    #[error("failed to decrypt {}: {message}", file.display())]
    SecretDecrypt { file: PathBuf, message: String },

    /// External command exited unsuccessfully
    #[error("{command} exited with {}", exit_code_label(*code))]
    CommandFailed { command: String, code: Option<i32> },

    /// External command could not be started or its I/O failed
    #[error("failed to run {command}: {source}")]
    CommandIo {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Namespace creation failed
    #[error("error while creating namespace {namespace}: {source}")]
    Namespace {
        namespace: String,
        #[source]
        source: Box<KubeDeployError>,
    },

    /// A deploy unit failed; wraps the underlying cause with the folder path
    #[error("failed to deploy {}: {source}", path.display())]
    Unit {
        path: PathBuf,
        #[source]
        source: Box<KubeDeployError>,
    },

    /// File system port error
    #[error(transparent)]
    Fs(#[from] FsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn exit_code_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl KubeDeployError {
    /// Failure class of this error; wrappers report the class of their cause
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TargetNotFound { .. }
            | Self::ConflictingFolders { .. }
            | Self::InvalidMergeFolder { .. }
            | Self::ReferencedPathNotFound { .. }
            | Self::MissingHelmChart { .. }
            | Self::MissingReleaseName { .. }
            | Self::MissingNamespace
            | Self::InvalidConfig { .. } => ErrorKind::Configuration,
            Self::ConfigFolderNotFound { .. }
            | Self::GitClone { .. }
            | Self::KubeconfigNotFound
            | Self::KubeconfigDecode { .. } => ErrorKind::Source,
            Self::InvalidSecret { .. } => ErrorKind::Secret,
            Self::Namespace { source, .. } | Self::Unit { source, .. } => source.kind(),
            Self::SecretDecrypt { .. }
            | Self::SecretParse { .. }
            | Self::SecretKey { .. }
            | Self::CommandFailed { .. }
            | Self::CommandIo { .. }
            | Self::Fs(_)
            | Self::Io(_)
            | Self::Json(_) => ErrorKind::Execution,
        }
    }

    /// Whether the run may continue past this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidSecret { .. })
    }

    /// Annotate an error with the deploy unit it came from
    pub fn in_unit(self, path: impl Into<PathBuf>) -> Self {
        Self::Unit {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
