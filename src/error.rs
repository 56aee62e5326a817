use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Prefix of every 502 body.
pub const FETCH_FAILED_PREFIX: &str = "Proxy fetch failed: ";

/// Every way a forwarding request can fail.
#[derive(Error, Debug)]
pub enum ForwardError {
    #[error("Missing ?url param")]
    MissingUrl,

    #[error("{0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Forbidden host")]
    ForbiddenHost,

    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("{0}")]
    Upstream(#[from] UpstreamError),
}

/// Result type alias for forwarding operations
pub type Result<T> = std::result::Result<T, ForwardError>;

impl ForwardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ForwardError::MissingUrl => StatusCode::BAD_REQUEST,
            ForwardError::ForbiddenHost => StatusCode::FORBIDDEN,
            ForwardError::InvalidUrl(_)
            | ForwardError::UnsupportedScheme(_)
            | ForwardError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Plain-text body sent to the caller.
    pub fn body(&self) -> String {
        if self.status_code() == StatusCode::BAD_GATEWAY {
            format!("{FETCH_FAILED_PREFIX}{self}")
        } else {
            self.to_string()
        }
    }

    /// Whether the failure happened after the request was accepted for fetching.
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        (self.status_code(), self.body()).into_response()
    }
}
