//! Execution venue seam.
//!
//! The host owns the venue. Every call is fire-and-forget: results come back
//! later as [`FillEvent`](crate::domain::FillEvent)s delivered to the engine.

use crate::domain::OrderId;

pub trait ExecutionVenue {
    /// Place a limit order. Positive quantity buys, negative sells.
    fn submit_limit_order(&mut self, symbol: &str, quantity: i64, limit_price: f64, tag: &str) -> OrderId;

    /// Cancel every open order for the symbol.
    fn cancel_open_orders(&mut self, symbol: &str);

    /// Close the whole position at market. Returns the orders placed, which
    /// may be empty when the venue holds nothing.
    fn liquidate(&mut self, symbol: &str, tag: &str) -> Vec<OrderId>;
}

impl<V: ExecutionVenue + ?Sized> ExecutionVenue for &mut V {
    fn submit_limit_order(&mut self, symbol: &str, quantity: i64, limit_price: f64, tag: &str) -> OrderId {
        (**self).submit_limit_order(symbol, quantity, limit_price, tag)
    }

    fn cancel_open_orders(&mut self, symbol: &str) {
        (**self).cancel_open_orders(symbol)
    }

    fn liquidate(&mut self, symbol: &str, tag: &str) -> Vec<OrderId> {
        (**self).liquidate(symbol, tag)
    }
}
