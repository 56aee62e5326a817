//! The forwarding pipeline.
//!
//! # Data Flow
//! ```text
//! ?url value
//!     → parse (url::Url)
//!     → security::allowlist (403 on mismatch, nothing fetched)
//!     → upstream::OutboundRequest (fixed header set)
//!     → resilience::retries (up to N attempts with backoff, under one deadline)
//!     → security::limits (byte cap)
//!     → Relayed (content type, body, truncated flag)
//! ```

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue};
use url::Url;

use crate::config::{validation::ValidationError, FetchProxyConfig};
use crate::error::{ForwardError, Result};
use crate::resilience::fetch_with_retries;
use crate::security::{cap_body, HostAllowlist};
use crate::upstream::{outbound_headers, OutboundRequest, Upstream, UpstreamError};

/// A successful fetch, ready to be written back to the caller.
#[derive(Debug, Clone)]
pub struct Relayed {
    pub content_type: HeaderValue,
    pub body: Bytes,
    pub truncated: bool,
}

/// Validates a target, fetches it and applies the size cap.
pub struct Forwarder {
    config: Arc<FetchProxyConfig>,
    upstream: Arc<dyn Upstream>,
    allowlist: HostAllowlist,
    headers: HeaderMap,
    default_content_type: HeaderValue,
}

impl Forwarder {
    pub fn new(
        config: Arc<FetchProxyConfig>,
        upstream: Arc<dyn Upstream>,
    ) -> std::result::Result<Self, ValidationError> {
        let headers = outbound_headers(&config.upstream)?;
        let default_content_type = HeaderValue::from_str(&config.upstream.default_content_type)
            .map_err(|e| ValidationError {
                field: "upstream.default_content_type",
                reason: e.to_string(),
            })?;

        Ok(Self {
            allowlist: HostAllowlist::new(&config.upstream.allowed_host_suffix),
            config,
            upstream,
            headers,
            default_content_type,
        })
    }

    pub fn allowlist(&self) -> &HostAllowlist {
        &self.allowlist
    }

    /// Run the whole pipeline for one `?url` value.
    ///
    /// An empty value is treated the same as a missing one. Every attempt and
    /// backoff sleep shares the `timeouts.request_secs` deadline.
    pub async fn forward(&self, target: Option<&str>) -> Result<Relayed> {
        let target = target
            .filter(|t| !t.is_empty())
            .ok_or(ForwardError::MissingUrl)?;

        let url = Url::parse(target)?;
        if !self.allowlist.permits(&url) {
            return Err(ForwardError::ForbiddenHost);
        }
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ForwardError::UnsupportedScheme(url.scheme().to_string()));
        }

        let request = OutboundRequest::new(url, self.headers.clone());
        let deadline = Duration::from_secs(self.config.timeouts.request_secs);
        let response = tokio::time::timeout(
            deadline,
            fetch_with_retries(self.upstream.as_ref(), &request, &self.config.retries),
        )
        .await
        .map_err(|_| UpstreamError::Transport("request timed out".into()))??;

        let content_type = response
            .headers
            .get(header::CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| self.default_content_type.clone());

        let capped = cap_body(response.body, self.config.upstream.max_body_bytes);

        Ok(Relayed {
            content_type,
            body: capped.bytes,
            truncated: capped.truncated,
        })
    }
}
