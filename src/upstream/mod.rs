//! Outbound fetch subsystem.
//!
//! # Data Flow
//! ```text
//! Forwarder
//!     → OutboundRequest (target URL + fixed header set)
//!     → Upstream::fetch (one attempt, driven by resilience::retries)
//!     → UpstreamResponse (status, headers, full body)
//! ```
//!
//! # Design Decisions
//! - The outbound client is a capability behind the `Upstream` trait, so the
//!   request pipeline can be exercised without a network
//! - No inbound header is ever copied onto an outbound request
//! - One attempt reads the whole body; nothing is streamed to the caller
//! - A body that breaks off after a 2xx head is not retried

pub mod client;
#[cfg(test)]
pub(crate) mod scripted;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use thiserror::Error;
use url::Url;

use crate::config::{validation::ValidationError, UpstreamConfig};

pub use client::ReqwestUpstream;

/// An immutable outbound GET request.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub url: Url,
    pub headers: HeaderMap,
}

impl OutboundRequest {
    pub fn new(url: Url, headers: HeaderMap) -> Self {
        Self { url, headers }
    }
}

/// Build the fixed header set sent with every outbound request.
///
/// The error names the configuration field holding the illegal value.
pub fn outbound_headers(config: &UpstreamConfig) -> Result<HeaderMap, ValidationError> {
    let fields = [
        (header::USER_AGENT, "upstream.user_agent", &config.user_agent),
        (header::ACCEPT, "upstream.accept", &config.accept),
        (
            header::ACCEPT_LANGUAGE,
            "upstream.accept_language",
            &config.accept_language,
        ),
    ];

    let mut headers = HeaderMap::with_capacity(fields.len());
    for (name, field, value) in fields {
        let value = HeaderValue::from_str(value).map_err(|e| ValidationError {
            field,
            reason: e.to_string(),
        })?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Response of a single outbound attempt.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Why an outbound attempt failed.
///
/// The `Display` output is what callers see after `Proxy fetch failed: `.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// Connection, TLS or redirect failure.
    #[error("{0}")]
    Transport(String),

    /// The upstream answered 2xx but its body could not be read to the end.
    /// Ends the retry loop.
    #[error("{0}")]
    Body(String),

    /// The upstream answered with a non-2xx status.
    #[error("HTTP {}", .0.as_u16())]
    Status(StatusCode),
}

/// Outbound HTTP client capability.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Perform one GET attempt, following redirects.
    ///
    /// Non-2xx statuses are returned as `Ok`; classifying them is left to the
    /// retry loop.
    async fn fetch(&self, request: &OutboundRequest) -> Result<UpstreamResponse, UpstreamError>;
}
