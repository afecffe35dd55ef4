//! Turtle signal evaluator — long-only state machine over FLAT / LONG(units).
//!
//! Rules are checked in strict priority and the first match wins:
//!
//! 1. Force-quit: holding and `last_fill - high >= stop_multiple * N`
//! 2. Exit: holding and `high < min_channel`
//! 3. Entry/add: no open order, `units < position_cap`, shares below the
//!    hard limit, and either
//!    - flat: `low >= max_channel`, or
//!    - long: `low >= last_fill + add_step * N` (pyramiding)
//!
//! The evaluator is pure: it reads a snapshot and returns an action. The
//! engine turns actions into venue calls and state transitions.

use crate::config::{LimitPriceSource, TurtleConfig};
use crate::domain::{Bar, Instrument, OrderReason};
use crate::indicators::ChannelLevels;
use crate::sizers::UnitSizer;

/// Everything the evaluator reads for one ready bar.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    pub bar: &'a Bar,
    pub n: f64,
    /// Channel over the bars preceding `bar`.
    pub channel: ChannelLevels,
    pub position_units: u32,
    pub holding_quantity: i64,
    pub last_fill_price: Option<f64>,
    /// Reason of the in-flight order, if any.
    pub open_order: Option<OrderReason>,
    /// Lot size source for order quantities.
    pub instrument: &'a Instrument,
}

/// Decision for one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Enter { quantity: i64, limit_price: f64 },
    Add { quantity: i64, limit_price: f64 },
    Exit,
    ForceQuit,
}

impl Action {
    pub fn reason(&self) -> OrderReason {
        match self {
            Action::Enter { .. } => OrderReason::Entry,
            Action::Add { .. } => OrderReason::Add,
            Action::Exit => OrderReason::Exit,
            Action::ForceQuit => OrderReason::ForceQuit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SignalEvaluator {
    position_cap: u32,
    stop_multiple: f64,
    add_step: f64,
    limit_price: LimitPriceSource,
    sizer: UnitSizer,
}

impl SignalEvaluator {
    pub fn new(config: &TurtleConfig) -> Self {
        Self {
            position_cap: config.position_cap,
            stop_multiple: config.stop_multiple,
            add_step: config.add_step,
            limit_price: config.limit_price,
            sizer: UnitSizer::new(config.total_cash, config.risk_fraction, config.notional_cap),
        }
    }

    pub fn sizer(&self) -> &UnitSizer {
        &self.sizer
    }

    pub fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Option<Action> {
        let bar = ctx.bar;
        let liquidating = ctx.open_order.is_some_and(|r| r.is_liquidation());
        let holding = ctx.holding_quantity > 0 && !liquidating;

        if holding {
            if let Some(last_fill) = ctx.last_fill_price {
                if last_fill - bar.high >= self.stop_multiple * ctx.n {
                    return Some(Action::ForceQuit);
                }
            }
            if bar.high < ctx.channel.min {
                return Some(Action::Exit);
            }
        }

        if ctx.open_order.is_some() || ctx.position_units >= self.position_cap {
            return None;
        }
        if ctx.holding_quantity >= self.sizer.hard_limit(bar.high) {
            return None;
        }

        let trigger = match ctx.last_fill_price {
            None => bar.low >= ctx.channel.max,
            Some(last_fill) => bar.low >= last_fill + self.add_step * ctx.n,
        };
        if !trigger {
            return None;
        }

        let quantity = ctx
            .instrument
            .round_to_lot(self.sizer.tradable(ctx.n, bar.high, ctx.holding_quantity));
        if quantity <= 0 {
            return None;
        }
        let limit_price = match self.limit_price {
            LimitPriceSource::High => bar.high,
            LimitPriceSource::Low => bar.low,
            LimitPriceSource::Close => bar.close,
        };

        Some(match ctx.last_fill_price {
            None => Action::Enter { quantity, limit_price },
            Some(_) => Action::Add { quantity, limit_price },
        })
    }
}
