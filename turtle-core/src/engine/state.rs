//! Per-instrument mutable state.

use crate::domain::OrderId;
use crate::orders::OpenOrder;
use chrono::{DateTime, NaiveDate, Utc};

/// State the engine keeps for one instrument.
///
/// Created at registration, reset at each session boundary (N and channels
/// are kept), never destroyed while subscribed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstrumentState {
    /// Smoothed true range; None during warm-up.
    pub n: Option<f64>,
    /// Entry channel the next bar is evaluated against.
    pub max_channel: Option<f64>,
    /// Exit channel the next bar is evaluated against.
    pub min_channel: Option<f64>,
    /// Units in the current pyramid.
    pub position_units: u32,
    /// Shares held, reconciled from fills.
    pub holding_quantity: i64,
    /// Price of the latest entry/add fill; None iff `position_units == 0`.
    pub last_fill_price: Option<f64>,
    /// At most one in-flight order.
    pub open_order: Option<OpenOrder>,
    /// Canceled orders whose late fills still count toward holdings.
    pub retired_orders: Vec<OrderId>,
    pub session_date: Option<NaiveDate>,
    pub last_bar_time: Option<DateTime<Utc>>,
}

impl InstrumentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_order_id(&self) -> Option<OrderId> {
        self.open_order.as_ref().and_then(|o| o.primary_id())
    }

    /// Clear per-session state. N, channels and holdings survive.
    pub(crate) fn reset_session(&mut self, date: NaiveDate) {
        self.last_fill_price = None;
        self.position_units = 0;
        self.open_order = None;
        self.session_date = Some(date);
    }

    /// First violated invariant, if any.
    pub fn invariant_violation(&self, position_cap: u32) -> Option<&'static str> {
        if self.last_fill_price.is_none() != (self.position_units == 0) {
            return Some("last_fill_price must be set iff position_units > 0");
        }
        if self.position_units > position_cap {
            return Some("position_units exceeds position_cap");
        }
        if self.n.is_some_and(|n| n < 0.0) {
            return Some("N must be non-negative");
        }
        if self.open_order.as_ref().is_some_and(|o| o.order_ids.is_empty()) {
            return Some("open order without venue ids");
        }
        None
    }
}
