//! Caliper Currency - Pair-rate conversion
//!
//! Converts amounts between currencies using a third-party pair-rate API.
//! Every conversion issues a fresh request so the result reflects the latest
//! available rate; there is no cache and no retry.

mod client;
mod config;
mod currency;
mod trend;

pub use client::{
    round2, CurrencyConversion, CurrencyConverter, ExchangeRateApi, RateError, RateProvider,
};
pub use config::{RateConfig, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use currency::{Currency, CURRENCIES};
pub use trend::{placeholder_trend, RateTrend, TrendPoint};
