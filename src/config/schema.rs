//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Mount points, in pipeline order.
    pub mounts: Vec<MountConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error, off).
    pub log_level: String,

    /// Enable the Prometheus endpoint.
    pub metrics_enabled: bool,

    /// Prometheus endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// A static responder mounted under a prefix, with optional nested mounts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MountConfig {
    /// Mount prefix; must begin with `/`.
    pub prefix: String,

    /// Name used in logs; defaults to the prefix.
    #[serde(default)]
    pub name: Option<String>,

    /// Response status when nothing deeper answered.
    #[serde(default)]
    pub status: Option<u16>,

    /// Response body when nothing deeper answered.
    #[serde(default)]
    pub body: Option<String>,

    /// Answer with the visible path and mount root instead of `body`.
    #[serde(default)]
    pub echo: bool,

    /// Mounts nested inside this one, relative to `prefix`.
    #[serde(default)]
    pub mounts: Vec<MountConfig>,
}

impl MountConfig {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            name: None,
            status: None,
            body: None,
            echo: false,
            mounts: Vec::new(),
        }
    }
}
