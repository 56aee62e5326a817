//! Retry logic.
//!
//! # Responsibilities
//! - Run up to `max_attempts` outbound attempts
//! - Treat transport errors and non-2xx statuses as the same kind of failure
//! - Sleep with exponential backoff between attempts
//! - Surface the last failure once attempts are exhausted
//!
//! # Design Decisions
//! - A permanent status (404) is retried exactly like a transient one (503)
//! - A broken body after a 2xx head is not an attempt failure; it is surfaced
//!   without another request
//! - No sleep after the final attempt; the caller gets the error immediately

use crate::config::RetryConfig;
use crate::observability::metrics;
use crate::resilience::backoff::calculate_backoff;
use crate::upstream::{OutboundRequest, Upstream, UpstreamError, UpstreamResponse};

/// Fetch `request`, retrying failed attempts with backoff.
pub async fn fetch_with_retries(
    upstream: &dyn Upstream,
    request: &OutboundRequest,
    config: &RetryConfig,
) -> Result<UpstreamResponse, UpstreamError> {
    let max_attempts = config.max_attempts.max(1);
    let mut attempts = 0;

    loop {
        attempts += 1;

        let error = match upstream.fetch(request).await {
            Ok(response) if response.status.is_success() => return Ok(response),
            Ok(response) => UpstreamError::Status(response.status),
            Err(e @ UpstreamError::Body(_)) => {
                tracing::warn!(
                    target_url = %request.url,
                    attempt = attempts,
                    error = %e,
                    "Upstream body read failed"
                );
                return Err(e);
            }
            Err(e) => e,
        };

        if attempts >= max_attempts {
            tracing::warn!(
                target_url = %request.url,
                attempts,
                error = %error,
                "Upstream attempts exhausted"
            );
            return Err(error);
        }

        let backoff = calculate_backoff(attempts - 1, config.base_delay_ms);
        tracing::info!(
            target_url = %request.url,
            attempt = attempts,
            delay = ?backoff,
            error = %error,
            "Retrying upstream fetch"
        );
        metrics::record_retry();
        tokio::time::sleep(backoff).await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use axum::http::{HeaderMap, StatusCode};
    use url::Url;

    use super::*;
    use crate::upstream::scripted::ScriptedUpstream;

    fn request() -> OutboundRequest {
        OutboundRequest::new(
            Url::parse("https://motionimefest.id/page.html").unwrap(),
            HeaderMap::new(),
        )
    }

    fn policy(max_attempts: u32, base_delay_ms: u64) -> RetryConfig {
        RetryConfig {
            max_attempts,
            base_delay_ms,
        }
    }

    #[tokio::test]
    async fn first_success_returns_immediately() {
        let upstream = ScriptedUpstream::new(vec![ScriptedUpstream::respond(200, None, "ok")]);

        let response = fetch_with_retries(&upstream, &request(), &policy(3, 200))
            .await
            .unwrap();

        assert_eq!(response.body, "ok");
        assert_eq!(upstream.calls(), 1);
    }

    #[tokio::test]
    async fn succeeds_on_third_attempt_after_backoff() {
        let upstream = ScriptedUpstream::new(vec![
            ScriptedUpstream::transport("connection reset"),
            ScriptedUpstream::transport("connection reset"),
            ScriptedUpstream::respond(200, Some("text/html"), "third time"),
        ]);

        let started = Instant::now();
        let response = fetch_with_retries(&upstream, &request(), &policy(3, 200))
            .await
            .unwrap();

        assert_eq!(response.body, "third time");
        assert_eq!(upstream.calls(), 3);
        assert!(started.elapsed() >= Duration::from_millis(600));
    }

    #[tokio::test]
    async fn non_success_status_is_retried_like_transport_failure() {
        let upstream = ScriptedUpstream::new(vec![
            ScriptedUpstream::respond(404, None, ""),
            ScriptedUpstream::respond(503, None, ""),
            ScriptedUpstream::respond(204, None, ""),
        ]);

        let response = fetch_with_retries(&upstream, &request(), &policy(3, 1))
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::NO_CONTENT);
        assert_eq!(upstream.calls(), 3);
    }

    #[tokio::test]
    async fn exhausted_attempts_surface_last_error() {
        let upstream = ScriptedUpstream::new(vec![
            ScriptedUpstream::transport("connection refused"),
            ScriptedUpstream::respond(500, None, ""),
            ScriptedUpstream::respond(404, None, ""),
            ScriptedUpstream::respond(200, None, "never reached"),
        ]);

        let err = fetch_with_retries(&upstream, &request(), &policy(3, 1))
            .await
            .unwrap_err();

        assert_eq!(err, UpstreamError::Status(StatusCode::NOT_FOUND));
        assert_eq!(err.to_string(), "HTTP 404");
        assert_eq!(upstream.calls(), 3);
    }

    #[tokio::test]
    async fn broken_body_is_not_retried() {
        let upstream = ScriptedUpstream::new(vec![
            ScriptedUpstream::broken_body("error decoding response body"),
            ScriptedUpstream::respond(200, None, "never reached"),
        ]);

        let err = fetch_with_retries(&upstream, &request(), &policy(3, 1))
            .await
            .unwrap_err();

        assert_eq!(err, UpstreamError::Body("error decoding response body".into()));
        assert_eq!(upstream.calls(), 1);
    }

    #[tokio::test]
    async fn single_attempt_does_not_sleep() {
        let upstream = ScriptedUpstream::new(vec![ScriptedUpstream::transport("boom")]);

        let started = Instant::now();
        let err = fetch_with_retries(&upstream, &request(), &policy(1, 10_000))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "boom");
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
