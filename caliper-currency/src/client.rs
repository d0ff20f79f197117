//! Pair-rate client
//!
//! One fresh HTTPS request per conversion. No retries, no caching: the
//! observable behavior is that every conversion reflects the latest rate the
//! provider will serve.

use crate::config::RateConfig;
use crate::currency::Currency;
use async_trait::async_trait;
use caliper_core::CaliperError;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection timeout in seconds
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors from the currency path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateError {
    /// Currency code not in the fixed table
    #[error("unknown currency: '{0}'")]
    UnknownCurrency(String),

    /// The network call itself failed, or the body could not be read/parsed
    #[error("API error: {0}")]
    Transport(String),

    /// Well-formed HTTP exchange lacking the expected data
    #[error("invalid API response")]
    InvalidResponse,

    /// No API key in the environment
    #[error("rate API key not configured")]
    MissingApiKey,
}

impl From<RateError> for CaliperError {
    fn from(err: RateError) -> Self {
        match err {
            RateError::UnknownCurrency(code) => CaliperError::unknown_currency(&code),
            RateError::Transport(details) => CaliperError::transport(details),
            RateError::InvalidResponse => CaliperError::invalid_response(),
            RateError::MissingApiKey => CaliperError::missing_config(format!(
                "rate API key not configured (set {})",
                crate::config::API_KEY_ENV
            )),
        }
    }
}

/// Source of pair rates. The HTTP client implements this; tests substitute
/// a canned provider.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// The multiplicative factor converting one unit of `from` into `to`
    async fn pair_rate(&self, from: &Currency, to: &Currency) -> Result<f64, RateError>;
}

/// Extract the conversion rate from a pair-endpoint exchange.
///
/// Pure function of status and body so the error taxonomy is testable
/// without a network: non-success status or a parsed body without a numeric
/// `conversion_rate` is an invalid response; an unparseable body is a
/// transport-level failure.
fn parse_pair_response(status: u16, body: &str) -> Result<f64, RateError> {
    if !(200..300).contains(&status) {
        return Err(RateError::InvalidResponse);
    }
    let data: serde_json::Value =
        serde_json::from_str(body).map_err(|e| RateError::Transport(format!("invalid JSON body: {}", e)))?;
    data.get("conversion_rate")
        .and_then(|v| v.as_f64())
        .ok_or(RateError::InvalidResponse)
}

/// HTTP implementation against the exchangerate-api pair endpoint
pub struct ExchangeRateApi {
    client: reqwest::Client,
    config: RateConfig,
}

impl ExchangeRateApi {
    pub fn new(config: RateConfig) -> Self {
        let client = reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client, config }
    }

    /// Build the client from environment configuration
    pub fn from_env() -> Result<Self, RateError> {
        Ok(Self::new(RateConfig::from_env()?))
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApi {
    async fn pair_rate(&self, from: &Currency, to: &Currency) -> Result<f64, RateError> {
        let url = self.config.pair_url(from.code, to.code);
        debug!(%from, %to, "requesting pair rate");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RateError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| RateError::Transport(e.to_string()))?;

        parse_pair_response(status, &body)
    }
}

/// Result of a currency conversion
#[derive(Debug, Clone, Serialize)]
pub struct CurrencyConversion {
    pub amount: f64,
    pub from: &'static str,
    pub to: &'static str,
    pub rate: f64,
    /// `amount * rate`, rounded to 2 decimal places
    pub converted: f64,
}

impl fmt::Display for CurrencyConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} = {:.2} {}",
            format_amount(self.amount),
            self.from,
            self.converted,
            self.to
        )
    }
}

/// Round to 2 decimal places, half away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format the input amount for display: integral amounts without a decimal
/// point, fractional amounts as given
fn format_amount(amount: f64) -> String {
    if amount == amount.trunc() && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else {
        format!("{}", amount)
    }
}

/// Converts amounts between currencies through a rate provider
pub struct CurrencyConverter<P> {
    provider: P,
}

impl<P: RateProvider> CurrencyConverter<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Convert `amount` between two currencies named by code.
    ///
    /// Codes are validated against the fixed table before any request goes
    /// out. Exactly one outbound request per invocation.
    pub async fn convert(
        &self,
        amount: f64,
        from_code: &str,
        to_code: &str,
    ) -> Result<CurrencyConversion, RateError> {
        let from = Currency::resolve(from_code)?;
        let to = Currency::resolve(to_code)?;

        let rate = match self.provider.pair_rate(from, to).await {
            Ok(rate) => rate,
            Err(e) => {
                warn!(%from, %to, error = %e, "pair rate lookup failed");
                return Err(e);
            }
        };

        debug!(%from, %to, rate, "pair rate received");
        Ok(CurrencyConversion {
            amount,
            from: from.code,
            to: to.code,
            rate,
            converted: round2(amount * rate),
        })
    }
}
