//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check addresses parse and timeouts are non-zero
//! - Check every mount prefix and status, nested ones included
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: ServerConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use axum::http::StatusCode;

use crate::config::schema::{MountConfig, ServerConfig};

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is not a valid socket address: {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than 0")]
    ZeroTimeout,

    #[error("observability.log_level must be one of trace|debug|info|warn|error|off, got {0:?}")]
    InvalidLogLevel(String),

    #[error("{location}.prefix must begin with \"/\", got {prefix:?}")]
    InvalidPrefix { location: String, prefix: String },

    #[error("{location}.status is not a valid HTTP status: {status}")]
    InvalidStatus { location: String, status: u16 },
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    for (i, mount) in config.mounts.iter().enumerate() {
        validate_mount(mount, &format!("mounts[{i}]"), &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_mount(mount: &MountConfig, location: &str, errors: &mut Vec<ValidationError>) {
    if !mount.prefix.starts_with('/') {
        errors.push(ValidationError::InvalidPrefix {
            location: location.to_string(),
            prefix: mount.prefix.clone(),
        });
    }

    if let Some(status) = mount.status {
        if StatusCode::from_u16(status).is_err() {
            errors.push(ValidationError::InvalidStatus {
                location: location.to_string(),
                status,
            });
        }
    }

    for (i, nested) in mount.mounts.iter().enumerate() {
        validate_mount(nested, &format!("{location}.mounts[{i}]"), errors);
    }
}
