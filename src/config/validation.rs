//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (attempts > 0, cap > 0, addresses parse)
//! - Check that configured header values are legal HTTP header values
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FetchProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::FetchProxyConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Validate a parsed configuration, collecting every error found.
pub fn validate_config(config: &FetchProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("not a socket address: {:?}", config.listener.bind_address),
        ));
    }

    let upstream = &config.upstream;
    if upstream.allowed_host_suffix.trim().is_empty() {
        errors.push(ValidationError::new(
            "upstream.allowed_host_suffix",
            "must not be empty",
        ));
    }
    if upstream.max_body_bytes == 0 {
        errors.push(ValidationError::new("upstream.max_body_bytes", "must be > 0"));
    }

    let header_fields = [
        ("upstream.user_agent", upstream.user_agent.as_str()),
        ("upstream.accept", upstream.accept.as_str()),
        ("upstream.accept_language", upstream.accept_language.as_str()),
        ("upstream.default_content_type", upstream.default_content_type.as_str()),
        ("response.allow_origin", config.response.allow_origin.as_str()),
        ("response.allow_methods", config.response.allow_methods.as_str()),
        ("response.cache_control", config.response.cache_control.as_str()),
    ];
    for (field, value) in header_fields {
        if HeaderValue::from_str(value).is_err() {
            errors.push(ValidationError::new(field, "not a valid HTTP header value"));
        }
    }

    if config.retries.max_attempts == 0 {
        errors.push(ValidationError::new("retries.max_attempts", "must be >= 1"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be > 0"));
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("not a socket address: {:?}", observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
