//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Outbound fetch:
//!     → retries.rs (attempt, classify failure, decide to retry)
//!     → backoff.rs (delay before the next attempt)
//! ```
//!
//! # Design Decisions
//! - Fixed attempt budget per request; no cross-request retry budget
//! - Deterministic delays (no jitter) so the schedule is observable

pub mod backoff;
pub mod retries;

pub use retries::fetch_with_retries;
