//! Exchange credential types.
//!
//! Single-operator credential pair for venue API access.

use zeroize::Zeroize;

/// Plaintext API credentials (in-memory only, never persisted).
///
/// This struct contains the plaintext credentials and should:
/// - Never be logged
/// - Never be serialized to disk
/// - Be zeroized when dropped
///
/// Absence of credentials is the expected signal to run the gateway in
/// simulation mode, so construction is total: `from_parts` returns `None`
/// when either half is missing or blank.
#[derive(Debug)]
pub struct ApiCredentials {
    /// API key (public identifier, sent as a request header)
    pub api_key: String,
    /// API secret (used only for request signing)
    pub api_secret: zeroize::Zeroizing<String>,
}

impl ApiCredentials {
    /// Create new API credentials.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: zeroize::Zeroizing::new(api_secret.into()),
        }
    }

    /// Build credentials from raw parts.
    ///
    /// Returns `None` if either part is empty after trimming, which callers
    /// treat as "no credentials configured" rather than an error.
    pub fn from_parts(api_key: &str, api_secret: &str) -> Option<Self> {
        let api_key = api_key.trim();
        let api_secret = api_secret.trim();

        if api_key.is_empty() || api_secret.is_empty() {
            return None;
        }

        Some(Self::new(api_key, api_secret))
    }
}

impl Zeroize for ApiCredentials {
    fn zeroize(&mut self) {
        self.api_key.zeroize();
        self.api_secret.zeroize();
    }
}

impl Drop for ApiCredentials {
    fn drop(&mut self) {
        self.zeroize();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_complete_pair() {
        let creds = ApiCredentials::from_parts("key", "secret").unwrap();
        assert_eq!(creds.api_key, "key");
        assert_eq!(creds.api_secret.as_str(), "secret");
    }

    #[test]
    fn test_from_parts_missing_half_is_none() {
        assert!(ApiCredentials::from_parts("", "secret").is_none());
        assert!(ApiCredentials::from_parts("key", "").is_none());
        assert!(ApiCredentials::from_parts("  ", "  ").is_none());
    }

    #[test]
    fn test_from_parts_trims_whitespace() {
        let creds = ApiCredentials::from_parts(" key ", " secret ").unwrap();
        assert_eq!(creds.api_key, "key");
        assert_eq!(creds.api_secret.as_str(), "secret");
    }
}
