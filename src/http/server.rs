//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID)
//! - Bind server to listener
//! - Dispatch fetch requests to the Forwarder
//! - Answer CORS preflight and liveness probes
//! - Observability (metrics, correlation IDs)

use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::loader::join_errors;
use crate::config::validation::{validate_config, ValidationError};
use crate::config::FetchProxyConfig;
use crate::forwarder::Forwarder;
use crate::http::request::{self, UuidRequestId};
use crate::http::response::{self, RelayHeaders};
use crate::observability::metrics;
use crate::upstream::{ReqwestUpstream, Upstream};

/// Error raised while assembling the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error("Invalid configuration: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Invalid response header: {0}")]
    Header(#[from] axum::http::header::InvalidHeaderValue),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
    pub relay_headers: Arc<RelayHeaders>,
}

/// HTTP server for the fetch proxy.
pub struct HttpServer {
    router: Router,
    config: Arc<FetchProxyConfig>,
}

impl HttpServer {
    /// Create a new HTTP server fetching through `reqwest`.
    pub fn new(config: FetchProxyConfig) -> Result<Self, ServerError> {
        let upstream = ReqwestUpstream::new(&config.timeouts)?;
        Self::with_upstream(config, Arc::new(upstream))
    }

    /// Create a new HTTP server fetching through the given client.
    ///
    /// The configuration is validated first; an empty host suffix would
    /// otherwise admit every host.
    pub fn with_upstream(
        config: FetchProxyConfig,
        upstream: Arc<dyn Upstream>,
    ) -> Result<Self, ServerError> {
        validate_config(&config).map_err(ServerError::Validation)?;
        let config = Arc::new(config);
        let forwarder = Forwarder::new(config.clone(), upstream)?;
        let relay_headers = RelayHeaders::from_config(&config.response)?;

        let state = AppState {
            forwarder: Arc::new(forwarder),
            relay_headers: Arc::new(relay_headers),
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(fetch_handler).options(preflight_handler))
            .route("/api/fetch", get(fetch_handler).options(preflight_handler))
            .route("/healthz", get(health_handler))
            .with_state(state)
            .layer(PropagateRequestIdLayer::new(request::X_REQUEST_ID.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(
                request::X_REQUEST_ID.clone(),
                UuidRequestId,
            ))
    }

    /// The fully layered router, for driving requests in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            allowed_host_suffix = %self.config.upstream.allowed_host_suffix,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &FetchProxyConfig {
        &self.config
    }
}

/// Fetch handler.
/// Forwards the `?url` target and relays the result, or renders the failure.
async fn fetch_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let start_time = Instant::now();
    let request_id = request::request_id(&headers);
    let target = request::target_from_query(query.as_deref());

    tracing::debug!(
        request_id = %request_id,
        target_url = ?target,
        "Forwarding request"
    );

    let response = match state.forwarder.forward(target.as_deref()).await {
        Ok(relayed) => {
            if relayed.truncated {
                tracing::warn!(
                    request_id = %request_id,
                    max_body_bytes = relayed.body.len(),
                    "Upstream body truncated"
                );
                metrics::record_truncated();
            }
            response::relay(relayed, &state.relay_headers)
        }
        Err(e) => {
            if e.is_server_error() {
                tracing::error!(request_id = %request_id, error = %e, "Proxy error");
            } else {
                tracing::warn!(request_id = %request_id, error = %e, "Request rejected");
            }
            e.into_response()
        }
    };

    metrics::record_request(response.status().as_u16(), start_time);
    response
}

/// CORS preflight handler. Never touches the upstream.
async fn preflight_handler(State(state): State<AppState>) -> Response {
    response::preflight(&state.relay_headers)
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
