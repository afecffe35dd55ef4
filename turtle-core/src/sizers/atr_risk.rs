//! Volatility-scaled unit sizer
//!
//! One unit risks a fixed fraction of cash per N of adverse movement. A
//! per-instrument notional cap bounds total shares held at the current price.

/// Unit sizer
///
/// # Formula
/// ```text
/// unit_shares = floor(total_cash * risk_fraction / N)
/// hard_limit  = floor(notional_cap / current_high)
/// tradable    = min(unit_shares, hard_limit - held)
/// ```
///
/// # Example
/// - Cash: $100,000, risk 1% ($1,000)
/// - N: $2.50 → unit = 400 shares
/// - Notional cap $50,000 at high $100 → hard limit 500 shares
/// - Already holding 400 → tradable = min(400, 100) = 100
#[derive(Debug, Clone)]
pub struct UnitSizer {
    total_cash: f64,
    risk_fraction: f64,
    notional_cap: f64,
}

impl UnitSizer {
    pub fn new(total_cash: f64, risk_fraction: f64, notional_cap: f64) -> Self {
        Self {
            total_cash,
            risk_fraction,
            notional_cap,
        }
    }

    /// Shares in one unit. Zero when N is not positive.
    pub fn unit_shares(&self, n: f64) -> i64 {
        if !(n > 0.0) || !n.is_finite() {
            return 0;
        }
        floor_to_i64(self.total_cash * self.risk_fraction / n)
    }

    /// Maximum shares the notional cap allows at this price.
    pub fn hard_limit(&self, current_high: f64) -> i64 {
        if !(current_high > 0.0) || !current_high.is_finite() {
            return 0;
        }
        floor_to_i64(self.notional_cap / current_high)
    }

    /// Quantity to buy this cycle, clamped to the headroom under the hard limit.
    /// Never negative.
    pub fn tradable(&self, n: f64, current_high: f64, held: i64) -> i64 {
        let headroom = self.hard_limit(current_high) - held;
        self.unit_shares(n).min(headroom).max(0)
    }
}

fn floor_to_i64(value: f64) -> i64 {
    // `as` saturates at the i64 bounds
    value.floor() as i64
}
