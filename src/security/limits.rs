//! Response size limits.
//!
//! # Responsibilities
//! - Enforce maximum relayed body size
//! - Report whether truncation happened so it can be signaled to the caller
//!
//! # Design Decisions
//! - Truncation is a policy outcome, not an error
//! - The cut is exact: a truncated body is always `max` bytes long

use axum::body::Bytes;

/// A body after the size cap has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CappedBody {
    pub bytes: Bytes,
    pub truncated: bool,
}

/// Cut `body` down to at most `max` bytes.
pub fn cap_body(body: Bytes, max: usize) -> CappedBody {
    if body.len() > max {
        CappedBody {
            bytes: body.slice(..max),
            truncated: true,
        }
    } else {
        CappedBody {
            bytes: body,
            truncated: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAP: usize = 2 * 1024 * 1024;

    #[test]
    fn body_at_cap_is_untouched() {
        let capped = cap_body(Bytes::from(vec![b'a'; CAP]), CAP);
        assert!(!capped.truncated);
        assert_eq!(capped.bytes.len(), CAP);
    }

    #[test]
    fn one_byte_over_cap_is_truncated() {
        let mut body = vec![b'a'; CAP];
        body.push(b'z');

        let capped = cap_body(Bytes::from(body), CAP);
        assert!(capped.truncated);
        assert_eq!(capped.bytes.len(), CAP);
        assert!(!capped.bytes.contains(&b'z'));
    }

    #[test]
    fn empty_body() {
        let capped = cap_body(Bytes::new(), CAP);
        assert!(!capped.truncated);
        assert!(capped.bytes.is_empty());
    }
}
