//! Rate API configuration
//!
//! The API key is a credential and comes from the environment, never from
//! source. The base URL can be overridden, which tests use to point the
//! client at a local endpoint.

use crate::client::RateError;
use std::env;
use std::fmt;

/// Environment variable holding the pair-rate API key
pub const API_KEY_ENV: &str = "CALIPER_RATE_API_KEY";

/// Environment variable overriding the pair-rate endpoint
pub const BASE_URL_ENV: &str = "CALIPER_RATE_API_URL";

/// Default pair-rate endpoint
pub const DEFAULT_BASE_URL: &str = "https://v6.exchangerate-api.com/v6";

/// Configuration for the rate client
#[derive(Clone)]
pub struct RateConfig {
    pub api_key: String,
    pub base_url: String,
}

impl RateConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Read configuration from the environment
    pub fn from_env() -> Result<Self, RateError> {
        let api_key = env::var(API_KEY_ENV).map_err(|_| RateError::MissingApiKey)?;
        let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self { api_key, base_url })
    }

    /// URL of the pair endpoint for a currency pair
    pub fn pair_url(&self, from: &str, to: &str) -> String {
        format!(
            "{}/{}/pair/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_key,
            from,
            to
        )
    }
}

// The key must not leak through debug output
impl fmt::Debug for RateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_url() {
        let config = RateConfig::new("secret", DEFAULT_BASE_URL);
        assert_eq!(
            config.pair_url("USD", "EUR"),
            "https://v6.exchangerate-api.com/v6/secret/pair/USD/EUR"
        );
    }

    #[test]
    fn test_pair_url_trims_trailing_slash() {
        let config = RateConfig::new("secret", "http://localhost:8080/");
        assert_eq!(config.pair_url("USD", "PKR"), "http://localhost:8080/secret/pair/USD/PKR");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = RateConfig::new("secret", DEFAULT_BASE_URL);
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn test_from_env() {
        // Single test touching the process environment to avoid races
        std::env::set_var(API_KEY_ENV, "k123");
        std::env::set_var(BASE_URL_ENV, "http://localhost:9000");
        let config = RateConfig::from_env().unwrap();
        assert_eq!(config.api_key, "k123");
        assert_eq!(config.base_url, "http://localhost:9000");
        std::env::remove_var(API_KEY_ENV);
        std::env::remove_var(BASE_URL_ENV);
    }
}
