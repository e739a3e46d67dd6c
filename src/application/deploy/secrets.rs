//! Secret Injector
//!
//! Turns `.ejson` files of a unit folder into `v1/Secret` objects and
//! removes them from the working copy before the folder is applied.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use super::options::SecretKey;
use crate::domain::ports::{Cluster, DeployEvent, DeployEventSink, FileSystem, SecretDecryptor};
use crate::error::{KubeDeployError, KubeDeployResult};

pub const SECRET_EXTENSION: &str = "ejson";

/// Unencrypted routing fields of an ejson file
#[derive(Debug, Default, Deserialize)]
struct SecretHeader {
    #[serde(rename = "_name", default)]
    name: String,
    #[serde(rename = "_namespace", default)]
    namespace: String,
}

#[derive(Debug, Default, Deserialize)]
struct SecretPayload {
    #[serde(default)]
    data: Map<String, Value>,
}

/// Files handled by one [`SecretInjector::inject_and_strip`] call
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SecretOutcome {
    pub applied: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Per-run secret injector; the private key is read at most once
pub struct SecretInjector<'a, C, D, F: ?Sized> {
    cluster: &'a C,
    decryptor: &'a D,
    fs: &'a F,
    keyring_dir: &'a Path,
    secret_key: &'a SecretKey,
    events: &'a dyn DeployEventSink,
    key: OnceCell<String>,
}

impl<'a, C, D, F> SecretInjector<'a, C, D, F>
where
    C: Cluster,
    D: SecretDecryptor,
    F: FileSystem + ?Sized,
{
    pub fn new(
        cluster: &'a C,
        decryptor: &'a D,
        fs: &'a F,
        keyring_dir: &'a Path,
        secret_key: &'a SecretKey,
        events: &'a dyn DeployEventSink,
    ) -> Self {
        Self {
            cluster,
            decryptor,
            fs,
            keyring_dir,
            secret_key,
            events,
            key: OnceCell::new(),
        }
    }

    /// Apply every valid ejson file below `folder`, deleting each one applied
    ///
    /// Invalid secrets are logged and left in place. Any other failure,
    /// including a failed delete, is returned immediately.
    pub fn inject_and_strip(
        &self,
        namespace: &str,
        folder: &Path,
    ) -> KubeDeployResult<SecretOutcome> {
        let mut outcome = SecretOutcome::default();

        let files = self.fs.list_files(folder)?;
        let secrets = files
            .iter()
            .filter(|file| file.extension().is_some_and(|ext| ext == SECRET_EXTENSION));

        for file in secrets {
            match self.apply_secret(namespace, file) {
                Ok((name, secret_namespace)) => {
                    self.fs.remove(file)?;
                    self.events.on_event(DeployEvent::SecretApplied {
                        file: file.clone(),
                        name,
                        namespace: secret_namespace,
                    });
                    outcome.applied.push(file.clone());
                }
                Err(err) if err.is_recoverable() => {
                    warn!("skipping creating ejson secret: {}", err);
                    self.events.on_event(DeployEvent::SecretSkipped {
                        file: file.clone(),
                        reason: err.to_string(),
                    });
                    outcome.skipped.push(file.clone());
                }
                Err(err) => return Err(err),
            }
        }

        Ok(outcome)
    }

    fn apply_secret(&self, namespace: &str, file: &Path) -> KubeDeployResult<(String, String)> {
        info!("create kubernetes secret from {}", file.display());

        let encrypted = self.fs.read(file)?;
        let header: SecretHeader = parse_secret(file, &encrypted)?;
        let (name, secret_namespace) = secret_target(file, header, namespace)?;

        let key = self.key()?;
        let decrypted = self
            .decryptor
            .decrypt(&self.fs.resolve(file), self.keyring_dir, key)?;
        let payload: SecretPayload = parse_secret(file, &decrypted)?;

        info!("creating secret {} in {}", name, secret_namespace);
        self.cluster
            .apply(&secret_manifest(&name, &secret_namespace, &payload.data))?;

        Ok((name, secret_namespace))
    }

    fn key(&self) -> KubeDeployResult<&str> {
        if let Some(key) = self.key.get() {
            return Ok(key.as_str());
        }
        let loaded = self.secret_key.load()?;
        Ok(self.key.get_or_init(|| loaded).as_str())
    }
}

fn parse_secret<T: for<'de> Deserialize<'de>>(file: &Path, bytes: &[u8]) -> KubeDeployResult<T> {
    serde_json::from_slice(bytes).map_err(|source| KubeDeployError::SecretParse {
        file: file.to_path_buf(),
        source,
    })
}

/// Name and namespace a secret is created under
fn secret_target(
    file: &Path,
    header: SecretHeader,
    default_namespace: &str,
) -> KubeDeployResult<(String, String)> {
    let invalid = |reason: &str| KubeDeployError::InvalidSecret {
        file: file.to_path_buf(),
        reason: reason.to_string(),
    };

    let name = header.name.trim().to_string();
    if name.is_empty() {
        return Err(invalid("_name can not be blank"));
    }

    let namespace = match header.namespace.trim() {
        "" => default_namespace.trim().to_string(),
        explicit => explicit.to_string(),
    };
    if namespace.is_empty() {
        return Err(invalid("_namespace can not be blank"));
    }

    Ok((name, namespace))
}

/// Opaque `v1/Secret` manifest; non-string values are stored as JSON
pub fn secret_manifest(name: &str, namespace: &str, data: &Map<String, Value>) -> Value {
    let encoded: Map<String, Value> = data
        .iter()
        .map(|(key, value)| {
            let raw = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), Value::String(STANDARD.encode(raw)))
        })
        .collect();

    json!({
        "apiVersion": "v1",
        "kind": "Secret",
        "metadata": { "name": name, "namespace": namespace },
        "type": "Opaque",
        "data": encoded,
    })
}
