//! Secret Decryptor Port
//!
//! Decrypts an encrypted-at-rest ejson file into its plaintext JSON.

use std::path::Path;

use crate::error::KubeDeployResult;

pub trait SecretDecryptor {
    /// Decrypt `file` using the keyring directory and, when non-empty, the
    /// private key material
    fn decrypt(&self, file: &Path, keyring_dir: &Path, key: &str) -> KubeDeployResult<Vec<u8>>;
}

impl<D: SecretDecryptor + ?Sized> SecretDecryptor for &D {
    fn decrypt(&self, file: &Path, keyring_dir: &Path, key: &str) -> KubeDeployResult<Vec<u8>> {
        (**self).decrypt(file, keyring_dir, key)
    }
}
