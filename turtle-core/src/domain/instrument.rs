use serde::{Deserialize, Serialize};

/// Asset class of a tradable instrument.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AssetClass {
    Equity,
    Future,
    Forex,
    Crypto,
}

/// A tradable instrument. Immutable once registered with the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instrument {
    pub symbol: String,
    /// Smallest tradable quantity; order sizes are whole multiples of this.
    pub lot_size: u32,
    pub asset_class: AssetClass,
    /// Host-side reference to the price feed (subscription key).
    pub feed: String,
}

impl Instrument {
    pub fn new(symbol: impl Into<String>, asset_class: AssetClass) -> Self {
        let symbol = symbol.into();
        Self {
            feed: symbol.clone(),
            symbol,
            lot_size: 1,
            asset_class,
        }
    }

    /// Equity with lot size 1, fed under its own symbol.
    pub fn equity(symbol: impl Into<String>) -> Self {
        Self::new(symbol, AssetClass::Equity)
    }

    pub fn with_lot_size(mut self, lot_size: u32) -> Self {
        self.lot_size = lot_size.max(1);
        self
    }

    pub fn with_feed(mut self, feed: impl Into<String>) -> Self {
        self.feed = feed.into();
        self
    }

    /// Round a share quantity down to a whole number of lots.
    pub fn round_to_lot(&self, quantity: i64) -> i64 {
        let lot = i64::from(self.lot_size.max(1));
        quantity.div_euclid(lot) * lot
    }
}
