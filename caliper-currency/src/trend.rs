//! Placeholder exchange-rate trend
//!
//! Historical rate data is out of scope; the trend endpoint serves a fixed
//! three-point series so the shell has something to chart.

use crate::currency::Currency;
use serde::Serialize;

/// One point of the trend series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: &'static str,
    pub rate: f64,
}

/// A rate trend for a currency pair
#[derive(Debug, Clone, Serialize)]
pub struct RateTrend {
    pub from: &'static str,
    pub to: &'static str,
    pub points: Vec<TrendPoint>,
}

const PLACEHOLDER_POINTS: [TrendPoint; 3] = [
    TrendPoint { date: "2025-02-20", rate: 275.0 },
    TrendPoint { date: "2025-02-21", rate: 277.0 },
    TrendPoint { date: "2025-02-22", rate: 280.0 },
];

/// The static placeholder series, tagged with the requested pair for display
pub fn placeholder_trend(from: &Currency, to: &Currency) -> RateTrend {
    RateTrend {
        from: from.code,
        to: to.code,
        points: PLACEHOLDER_POINTS.to_vec(),
    }
}
