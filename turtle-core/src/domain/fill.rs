use crate::domain::ids::OrderId;
use serde::{Deserialize, Serialize};

/// Venue-reported status of an order event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillStatus {
    Filled,
    PartiallyFilled,
    Canceled,
    Invalid,
}

/// Fill/cancel feedback from the execution venue. Consumed once.
///
/// `fill_quantity` is the signed quantity filled by this event (positive for
/// buys, negative for sells).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillEvent {
    pub symbol: String,
    pub order_id: OrderId,
    pub status: FillStatus,
    pub fill_price: f64,
    pub fill_quantity: i64,
}

impl FillEvent {
    pub fn filled(symbol: impl Into<String>, order_id: OrderId, price: f64, quantity: i64) -> Self {
        Self {
            symbol: symbol.into(),
            order_id,
            status: FillStatus::Filled,
            fill_price: price,
            fill_quantity: quantity,
        }
    }

    pub fn partial(symbol: impl Into<String>, order_id: OrderId, price: f64, quantity: i64) -> Self {
        Self {
            status: FillStatus::PartiallyFilled,
            ..Self::filled(symbol, order_id, price, quantity)
        }
    }

    pub fn invalid(symbol: impl Into<String>, order_id: OrderId) -> Self {
        Self {
            symbol: symbol.into(),
            order_id,
            status: FillStatus::Invalid,
            fill_price: 0.0,
            fill_quantity: 0,
        }
    }

    pub fn canceled(symbol: impl Into<String>, order_id: OrderId) -> Self {
        Self {
            status: FillStatus::Canceled,
            ..Self::invalid(symbol, order_id)
        }
    }
}
