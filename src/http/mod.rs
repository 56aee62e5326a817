//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → server.rs (Axum setup, middleware, dispatch)
//!     → request.rs (request ID, ?url extraction)
//!     → forwarder (validate, fetch with retries, cap)
//!     → response.rs (CORS/cache headers, truncation flag)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::{RelayHeaders, X_PROXY_TRUNCATED};
pub use server::{HttpServer, ServerError};
