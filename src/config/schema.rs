//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section falls back to its defaults, so an empty file is valid.

use serde::{Deserialize, Serialize};

use crate::endpoint::CSI_ENDPOINT;

/// Root configuration for the hostpath plugin.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct PluginConfig {
    /// Where the endpoint comes from and how its socket file is handled.
    pub endpoint: EndpointConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Shutdown behaviour.
    pub shutdown: ShutdownConfig,
}

/// Endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EndpointConfig {
    /// Environment variable holding the endpoint string.
    pub env_var: String,

    /// Remove the UNIX socket file when the plugin exits.
    pub remove_sock_file_on_exit: bool,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            env_var: CSI_ENDPOINT.to_string(),
            remove_sock_file_on_exit: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default `tracing` filter, used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "csi_hostpath=info".to_string(),
        }
    }
}

/// Shutdown configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Seconds to wait for subscribers after the shutdown signal.
    pub grace_period_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            grace_period_secs: 5,
        }
    }
}
