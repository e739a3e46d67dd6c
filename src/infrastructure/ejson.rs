//! `ejson` CLI decryptor

use std::path::Path;
use std::process::Command;

use super::env::RunEnv;
use super::process;
use crate::domain::ports::SecretDecryptor;
use crate::error::{KubeDeployError, KubeDeployResult};

const EJSON: &str = "ejson";

pub struct EjsonDecryptor {
    env: RunEnv,
}

impl EjsonDecryptor {
    pub fn new(env: RunEnv) -> Self {
        Self { env }
    }
}

/// `ejson` arguments; the key is read from stdin only when one is given
pub fn decrypt_args(file: &Path, keyring_dir: &Path, key: &str) -> Vec<String> {
    let mut args = vec![
        "--keydir".to_string(),
        keyring_dir.display().to_string(),
        "decrypt".to_string(),
    ];
    if !key.is_empty() {
        args.push("--key-from-stdin".to_string());
    }
    args.push(file.display().to_string());
    args
}

impl SecretDecryptor for EjsonDecryptor {
    fn decrypt(&self, file: &Path, keyring_dir: &Path, key: &str) -> KubeDeployResult<Vec<u8>> {
        let mut cmd = Command::new(EJSON);
        self.env.apply(&mut cmd);
        cmd.args(decrypt_args(file, keyring_dir, key));

        let stdin = (!key.is_empty()).then_some(key.as_bytes());
        let output = process::capture(&mut cmd, stdin).map_err(|e| {
            KubeDeployError::SecretDecrypt {
                file: file.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        if !output.status.success() {
            return Err(KubeDeployError::SecretDecrypt {
                file: file.to_path_buf(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}
