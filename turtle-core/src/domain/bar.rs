//! Bar — the consolidated market data unit delivered by the host.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// OHLC bar for a single symbol over one consolidation interval.
///
/// Bars are produced by the host's consolidator and consumed exactly once.
/// `end_time` orders bars per instrument and names the session they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub symbol: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub end_time: DateTime<Utc>,
}

impl Bar {
    pub fn new(
        symbol: impl Into<String>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            open,
            high,
            low,
            close,
            end_time,
        }
    }

    /// A price is missing or not a real number (NaN or infinite).
    pub fn is_void(&self) -> bool {
        ![self.open, self.high, self.low, self.close]
            .iter()
            .all(|p| p.is_finite())
    }

    /// Tradable bar: all prices present and positive, and open and close
    /// inside the high/low range.
    pub fn is_sane(&self) -> bool {
        if self.is_void() || self.low <= 0.0 || self.high < self.low {
            return false;
        }
        let inside = |p: f64| p >= self.low && p <= self.high;
        inside(self.open) && inside(self.close)
    }

    /// Trading session this bar belongs to (UTC calendar date of its end time).
    pub fn session_date(&self) -> NaiveDate {
        self.end_time.date_naive()
    }
}
