//! Host allowlist.
//! Restricts outbound fetches to hostnames ending with a fixed suffix.

use url::Url;

/// Hostname suffix allowlist.
///
/// Matching is a plain string suffix test on the parsed hostname, so
/// `sub.motionimefest.id` and `evil-motionimefest.id` are both permitted for
/// the suffix `motionimefest.id`. This is not a registrable-domain check.
#[derive(Debug, Clone)]
pub struct HostAllowlist {
    suffix: String,
}

impl HostAllowlist {
    pub fn new(suffix: &str) -> Self {
        // Parsed hostnames are already lowercase.
        Self {
            suffix: suffix.to_ascii_lowercase(),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Whether the URL's hostname ends with the allowed suffix.
    /// URLs without a host are never permitted.
    pub fn permits(&self, url: &Url) -> bool {
        url.host_str()
            .is_some_and(|host| host.ends_with(&self.suffix))
    }
}
