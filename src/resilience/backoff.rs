//! Exponential backoff.

use std::time::Duration;

/// Delay to wait after the failed attempt with the given 0-based index.
///
/// `base * 2^attempt_index`: 200ms, 400ms, 800ms, ... for a 200ms base.
pub fn calculate_backoff(attempt_index: u32, base_ms: u64) -> Duration {
    let exponential_base = 2u64.saturating_pow(attempt_index);
    Duration::from_millis(base_ms.saturating_mul(exponential_base))
}
