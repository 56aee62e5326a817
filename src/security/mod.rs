//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming target URL:
//!     → allowlist.rs (hostname suffix check, before any outbound traffic)
//! Upstream body:
//!     → limits.rs (byte cap, truncation flag)
//! ```
//!
//! # Design Decisions
//! - Fail closed: a URL without a hostname is rejected
//! - No inbound header is trusted or forwarded

pub mod allowlist;
pub mod limits;

pub use allowlist::HostAllowlist;
pub use limits::{cap_body, CappedBody};
