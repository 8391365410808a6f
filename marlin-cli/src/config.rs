//! Operator configuration.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Absent credentials are not an error: the gateway treats them as the
//! signal to run in simulation mode.

use std::env;

use marlin_domain::ApiCredentials;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable had an unusable value
    #[error("Configuration error: {0}")]
    Invalid(String),
}

/// Operator configuration.
#[derive(Debug)]
pub struct Config {
    /// Venue credentials; `None` commits the gateway to simulation
    pub credentials: Option<ApiCredentials>,

    /// Use the venue's testnet environment (default: true)
    pub testnet: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BINANCE_API_KEY`: venue API key (optional)
    /// - `BINANCE_API_SECRET`: venue API secret (optional)
    /// - `MARLIN_TESTNET`: use the futures testnet (default: true)
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let api_key = env::var("BINANCE_API_KEY").unwrap_or_default();
        let api_secret = env::var("BINANCE_API_SECRET").unwrap_or_default();
        let credentials = ApiCredentials::from_parts(&api_key, &api_secret);

        let testnet = Self::load_bool_env("MARLIN_TESTNET", true)?;

        Ok(Self { credentials, testnet })
    }

    /// Create test configuration (no credentials, testnet).
    pub fn test() -> Self {
        Self { credentials: None, testnet: true }
    }

    fn load_bool_env(var: &str, default: bool) -> Result<bool, ConfigError> {
        match env::var(var) {
            Err(_) => Ok(default),
            Ok(value) => match value.to_lowercase().as_str() {
                "1" | "true" | "yes" => Ok(true),
                "0" | "false" | "no" => Ok(false),
                other => Err(ConfigError::Invalid(format!(
                    "Invalid {}: {}. Expected true or false",
                    var, other
                ))),
            },
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_config_has_no_credentials() {
        let config = Config::test();
        assert!(config.credentials.is_none());
        assert!(config.testnet);
    }

    #[test]
    fn test_load_bool_env_defaults() {
        // Variable not set in the test environment
        assert!(Config::load_bool_env("MARLIN_TEST_UNSET_FLAG", true).unwrap());
        assert!(!Config::load_bool_env("MARLIN_TEST_UNSET_FLAG", false).unwrap());
    }
}
