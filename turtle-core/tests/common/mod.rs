//! Shared test helpers: a recording paper venue and bar builders.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashMap;
use turtle_core::domain::{Bar, FillEvent, OrderId};
use turtle_core::orders::ExecutionVenue;

/// A limit order as the venue received it.
#[derive(Debug, Clone, PartialEq)]
pub struct Submitted {
    pub id: OrderId,
    pub symbol: String,
    pub quantity: i64,
    pub limit_price: f64,
    pub tag: String,
}

/// Venue that records every call and fills on demand.
#[derive(Debug, Default)]
pub struct PaperVenue {
    next_id: u64,
    pub submitted: Vec<Submitted>,
    pub cancels: Vec<String>,
    pub liquidations: Vec<(String, String)>,
    /// Orders the venue still considers working: (id, symbol, quantity).
    pub outstanding: Vec<(OrderId, String, i64)>,
    pub holdings: HashMap<String, i64>,
}

impl PaperVenue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outstanding_for(&self, symbol: &str) -> usize {
        self.outstanding.iter().filter(|(_, s, _)| s == symbol).count()
    }

    /// Fill whatever remains of the oldest working order for the symbol.
    pub fn fill_next(&mut self, symbol: &str, price: f64) -> Option<FillEvent> {
        let pos = self.outstanding.iter().position(|(_, s, _)| s == symbol)?;
        let (id, symbol, quantity) = self.outstanding.remove(pos);
        *self.holdings.entry(symbol.clone()).or_default() += quantity;
        Some(FillEvent::filled(symbol, id, price, quantity))
    }

    /// Fill `quantity` shares (same sign as the order) of the oldest working
    /// order, leaving the remainder working. None if that would complete it.
    pub fn fill_partial(&mut self, symbol: &str, price: f64, quantity: i64) -> Option<FillEvent> {
        let slot = self.outstanding.iter_mut().find(|(_, s, _)| s == symbol)?;
        let (id, _, remaining) = slot;
        if quantity == 0 || quantity.signum() != remaining.signum() || quantity.abs() >= remaining.abs() {
            return None;
        }
        *remaining -= quantity;
        let id = *id;
        *self.holdings.entry(symbol.to_string()).or_default() += quantity;
        Some(FillEvent::partial(symbol, id, price, quantity))
    }

    /// Id of the oldest working order for the symbol.
    pub fn working(&self, symbol: &str) -> Option<OrderId> {
        self.outstanding
            .iter()
            .find(|(_, s, _)| s == symbol)
            .map(|(id, _, _)| *id)
    }

    fn next_id(&mut self) -> OrderId {
        self.next_id += 1;
        OrderId(self.next_id)
    }
}

impl ExecutionVenue for PaperVenue {
    fn submit_limit_order(&mut self, symbol: &str, quantity: i64, limit_price: f64, tag: &str) -> OrderId {
        let id = self.next_id();
        self.submitted.push(Submitted {
            id,
            symbol: symbol.to_string(),
            quantity,
            limit_price,
            tag: tag.to_string(),
        });
        self.outstanding.push((id, symbol.to_string(), quantity));
        id
    }

    fn cancel_open_orders(&mut self, symbol: &str) {
        self.cancels.push(symbol.to_string());
        self.outstanding.retain(|(_, s, _)| s != symbol);
    }

    fn liquidate(&mut self, symbol: &str, tag: &str) -> Vec<OrderId> {
        self.liquidations.push((symbol.to_string(), tag.to_string()));
        let held = self.holdings.get(symbol).copied().unwrap_or(0);
        if held == 0 {
            return Vec::new();
        }
        let id = self.next_id();
        self.outstanding.push((id, symbol.to_string(), -held));
        vec![id]
    }
}

/// 2024-01-02 14:00 UTC plus `minutes`. Keeps every bar in one session.
pub fn intraday(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 14, 0, 0).unwrap() + Duration::minutes(minutes)
}

/// Bars from (open, high, low, close) tuples, one minute apart, same session.
pub fn ohlc_bars(symbol: &str, data: &[(f64, f64, f64, f64)]) -> Vec<Bar> {
    data.iter()
        .enumerate()
        .map(|(i, &(o, h, l, c))| Bar::new(symbol, o, h, l, c, intraday(i as i64)))
        .collect()
}
