//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the fetch proxy.
//! All types derive Serde traits for deserialization from config files, and every
//! section falls back to compiled defaults so an empty file is a valid config.

use serde::{Deserialize, Serialize};

/// Root configuration for the fetch proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FetchProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Outbound fetch policy: allowlist, byte cap, fixed request headers.
    pub upstream: UpstreamConfig,

    /// Retry configuration for the outbound fetch.
    pub retries: RetryConfig,

    /// Headers attached to relayed responses.
    pub response: ResponseConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Outbound fetch policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Hostname suffix every target must end with (plain suffix match).
    pub allowed_host_suffix: String,

    /// Maximum number of body bytes relayed to the caller.
    pub max_body_bytes: usize,

    /// User-Agent sent on every outbound request.
    pub user_agent: String,

    /// Accept header sent on every outbound request.
    pub accept: String,

    /// Accept-Language header sent on every outbound request.
    pub accept_language: String,

    /// Content type used when the upstream omits one.
    pub default_content_type: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            allowed_host_suffix: "motionimefest.id".to_string(),
            max_body_bytes: 2 * 1024 * 1024, // 2MiB
            user_agent: "MotionImeMonitor/1.0 (+https://yourdomain.vercel.app)".to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            default_content_type: "text/html".to_string(),
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 200,
        }
    }
}

/// Headers attached to every relayed (200) response.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResponseConfig {
    /// Value of `Access-Control-Allow-Origin`.
    pub allow_origin: String,

    /// Value of `Access-Control-Allow-Methods`.
    pub allow_methods: String,

    /// Value of `Cache-Control`.
    pub cache_control: String,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_methods: "GET,OPTIONS".to_string(),
            cache_control: "s-maxage=5, stale-while-revalidate=10".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Outbound connection establishment timeout in seconds (0 = transport default).
    pub connect_secs: u64,

    /// Deadline for the whole outbound fetch (every attempt and backoff) in seconds.
    /// Expiry is reported as a 502.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 0,
            request_secs: 30,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "fetch_proxy=info,tower_http=info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
