//! Response construction.
//!
//! # Responsibilities
//! - Write a relayed upstream body back to the client
//! - Attach CORS and caching headers
//! - Signal truncation via `x-proxy-truncated`
//! - Answer CORS preflight requests
//!
//! # Design Decisions
//! - Header values are validated once at startup, not per request
//! - Error responses are rendered by `ForwardError` and carry no CORS headers

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::Response,
};

use crate::config::ResponseConfig;
use crate::forwarder::Relayed;

/// Header set on responses whose body was cut to the size cap.
pub static X_PROXY_TRUNCATED: HeaderName = HeaderName::from_static("x-proxy-truncated");

/// Pre-validated headers attached to every relayed response.
#[derive(Debug, Clone)]
pub struct RelayHeaders {
    allow_origin: HeaderValue,
    allow_methods: HeaderValue,
    cache_control: HeaderValue,
}

impl RelayHeaders {
    pub fn from_config(config: &ResponseConfig) -> Result<Self, header::InvalidHeaderValue> {
        Ok(Self {
            allow_origin: HeaderValue::from_str(&config.allow_origin)?,
            allow_methods: HeaderValue::from_str(&config.allow_methods)?,
            cache_control: HeaderValue::from_str(&config.cache_control)?,
        })
    }
}

/// Build the 200 response for a successful fetch.
pub fn relay(relayed: Relayed, headers: &RelayHeaders) -> Response {
    let mut response = Response::new(Body::from(relayed.body));
    let map = response.headers_mut();
    map.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, headers.allow_origin.clone());
    map.insert(header::ACCESS_CONTROL_ALLOW_METHODS, headers.allow_methods.clone());
    map.insert(header::CONTENT_TYPE, relayed.content_type);
    map.insert(header::CACHE_CONTROL, headers.cache_control.clone());
    if relayed.truncated {
        map.insert(X_PROXY_TRUNCATED.clone(), HeaderValue::from_static("true"));
    }
    response
}

/// Build the 204 answer to a CORS preflight.
pub fn preflight(headers: &RelayHeaders) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    let map = response.headers_mut();
    map.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, headers.allow_origin.clone());
    map.insert(header::ACCESS_CONTROL_ALLOW_METHODS, headers.allow_methods.clone());
    response
}
