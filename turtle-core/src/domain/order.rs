//! Order intents emitted by the signal evaluator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an order was placed. Also used as the venue order tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderReason {
    /// First unit on a channel breakout.
    Entry,
    /// Pyramiding: one more unit after a favorable move.
    Add,
    /// Price fell through the exit channel.
    Exit,
    /// Stop-loss: price fell the stop distance below the last fill.
    ForceQuit,
}

impl OrderReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderReason::Entry => "entry",
            OrderReason::Add => "add",
            OrderReason::Exit => "exit",
            OrderReason::ForceQuit => "force-quit",
        }
    }

    /// Exit and force-quit liquidate the whole position.
    pub fn is_liquidation(&self) -> bool {
        matches!(self, OrderReason::Exit | OrderReason::ForceQuit)
    }
}

impl fmt::Display for OrderReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the engine asked the venue to do in one evaluation cycle.
///
/// Entry/add intents carry a positive quantity and a limit price. Liquidation
/// intents carry the negative of the quantity held and no limit price (the
/// venue liquidates at market).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderIntent {
    pub symbol: String,
    pub signed_quantity: i64,
    pub limit_price: Option<f64>,
    pub reason: OrderReason,
}

impl OrderIntent {
    pub fn buy_limit(symbol: impl Into<String>, quantity: i64, limit_price: f64, reason: OrderReason) -> Self {
        Self {
            symbol: symbol.into(),
            signed_quantity: quantity,
            limit_price: Some(limit_price),
            reason,
        }
    }

    pub fn liquidate(symbol: impl Into<String>, held_quantity: i64, reason: OrderReason) -> Self {
        Self {
            symbol: symbol.into(),
            signed_quantity: -held_quantity,
            limit_price: None,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_tags() {
        assert_eq!(OrderReason::ForceQuit.to_string(), "force-quit");
        assert_eq!(OrderReason::Entry.to_string(), "entry");
        assert!(OrderReason::Exit.is_liquidation());
        assert!(!OrderReason::Add.is_liquidation());
    }

    #[test]
    fn liquidation_intent_is_negative() {
        let intent = OrderIntent::liquidate("SPY", 120, OrderReason::Exit);
        assert_eq!(intent.signed_quantity, -120);
        assert_eq!(intent.limit_price, None);
    }

    #[test]
    fn reason_serializes_kebab_case() {
        let json = serde_json::to_string(&OrderReason::ForceQuit).unwrap();
        assert_eq!(json, "\"force-quit\"");
    }
}
