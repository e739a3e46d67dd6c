//! SSH bastion descriptor

use serde::{Deserialize, Serialize};

/// Default API server port forwarded through the bastion
pub const DEFAULT_API_PORT: u16 = 6443;

/// SSH bastion used to reach the cluster API server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bastion {
    #[serde(alias = "Enabled")]
    pub enabled: bool,

    /// Host to port forward the kubernetes api server from
    #[serde(alias = "Host")]
    pub host: String,

    #[serde(alias = "User", skip_serializing_if = "String::is_empty")]
    pub user: String,

    #[serde(alias = "KeyFile", skip_serializing_if = "String::is_empty")]
    pub key_file: String,

    /// Host the bastion forwards to (the API server as seen from the bastion)
    #[serde(
        alias = "RemotePortforwardHost",
        alias = "remotePortForwardHost",
        skip_serializing_if = "String::is_empty"
    )]
    pub remote_portforward_host: String,

    #[serde(alias = "LocalPort")]
    pub local_port: u16,

    #[serde(alias = "RemotePort")]
    pub remote_port: u16,
}

impl Default for Bastion {
    fn default() -> Self {
        Self {
            enabled: false,
            host: String::new(),
            user: String::new(),
            key_file: String::new(),
            remote_portforward_host: String::new(),
            local_port: DEFAULT_API_PORT,
            remote_port: DEFAULT_API_PORT,
        }
    }
}

impl Bastion {
    /// A tunnel is only opened for an enabled bastion with a host
    pub fn is_active(&self) -> bool {
        self.enabled && !self.host.trim().is_empty()
    }

    /// Forward target as seen from the bastion host
    pub fn remote_host(&self) -> &str {
        if self.remote_portforward_host.is_empty() {
            "localhost"
        } else {
            &self.remote_portforward_host
        }
    }
}
