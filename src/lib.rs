//! Allowlisted HTTP fetch proxy library.

pub mod config;
pub mod error;
pub mod forwarder;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod security;
pub mod upstream;

pub use config::FetchProxyConfig;
pub use error::ForwardError;
pub use forwarder::{Forwarder, Relayed};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
