//! `reqwest`-backed outbound client.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::TimeoutConfig;
use crate::upstream::{OutboundRequest, Upstream, UpstreamError, UpstreamResponse};

/// Maximum redirect hops followed per attempt.
const MAX_REDIRECTS: usize = 10;

/// Outbound client over `reqwest`.
///
/// Idle connections are not pooled; every attempt opens a fresh connection.
#[derive(Debug, Clone)]
pub struct ReqwestUpstream {
    client: reqwest::Client,
}

impl ReqwestUpstream {
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .no_proxy()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));

        if timeouts.connect_secs > 0 {
            builder = builder.connect_timeout(Duration::from_secs(timeouts.connect_secs));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Upstream for ReqwestUpstream {
    async fn fetch(&self, request: &OutboundRequest) -> Result<UpstreamResponse, UpstreamError> {
        let response = self
            .client
            .get(request.url.clone())
            .headers(request.headers.clone())
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        let headers = response.headers().clone();

        // Failed attempts are discarded, so their bodies are never read.
        if !status.is_success() {
            return Ok(UpstreamResponse {
                status,
                headers,
                body: Default::default(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Body(e.to_string()))?;

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}
