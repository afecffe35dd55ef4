//! Order coordinator — the instrument's single in-flight order and its fills.
//!
//! The coordinator owns the order half of [`InstrumentState`]:
//! - Submission records the venue's order as the sole open order; a second
//!   submission while one is open is rejected.
//! - Cancellation retires the open order. Late fills of a retired order still
//!   move the share count (the shares are real) but never the unit counter.
//! - Fill dispatch:
//!   - `Invalid`, `Canceled` → logged, no state change
//!   - `PartiallyFilled` → shares always counted; price and unit per
//!     [`PartialFillPolicy`]
//!   - `Filled` buy → last fill price set, unit counted, marker cleared
//!   - `Filled` liquidation → last fill price cleared, marker cleared

use crate::config::PartialFillPolicy;
use crate::domain::{FillEvent, FillStatus, OrderId, OrderIntent, OrderReason};
use crate::engine::InstrumentState;
use crate::orders::ExecutionVenue;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Retired order ids remembered per instrument.
const MAX_RETIRED: usize = 16;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("{symbol} already has open order {open} ({reason})")]
    OrderAlreadyOpen {
        symbol: String,
        open: OrderId,
        reason: OrderReason,
    },
}

/// The instrument's in-flight order. A liquidation may span several venue
/// orders; they are tracked together as one logical order.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenOrder {
    pub order_ids: Vec<OrderId>,
    pub reason: OrderReason,
    pub quantity: i64,
    pub limit_price: Option<f64>,
    pub filled_quantity: i64,
    unit_counted: bool,
}

impl OpenOrder {
    pub fn primary_id(&self) -> Option<OrderId> {
        self.order_ids.first().copied()
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.order_ids.contains(&id)
    }
}

/// What a fill event did to the instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// Quantity applied; the order is still open.
    Applied,
    /// The open order completed and the marker was cleared.
    Completed,
    /// Late fill of a retired order; only the share count moved.
    Reconciled,
    /// No state change.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct OrderCoordinator {
    partial_fills: PartialFillPolicy,
}

impl OrderCoordinator {
    pub fn new(partial_fills: PartialFillPolicy) -> Self {
        Self { partial_fills }
    }

    /// Send an intent to the venue and record it as the open order.
    ///
    /// Limit intents become one limit order; intents without a limit price
    /// liquidate. Returns the venue order ids (empty if the venue placed
    /// nothing, in which case no open order is recorded).
    pub fn submit<V: ExecutionVenue + ?Sized>(
        &self,
        state: &mut InstrumentState,
        intent: &OrderIntent,
        venue: &mut V,
    ) -> Result<Vec<OrderId>, OrderError> {
        if let Some(open) = &state.open_order {
            return Err(OrderError::OrderAlreadyOpen {
                symbol: intent.symbol.clone(),
                open: open.primary_id().unwrap_or(OrderId(0)),
                reason: open.reason,
            });
        }

        let tag = intent.reason.as_str();
        let order_ids = match intent.limit_price {
            Some(price) => vec![venue.submit_limit_order(&intent.symbol, intent.signed_quantity, price, tag)],
            None => venue.liquidate(&intent.symbol, tag),
        };

        if order_ids.is_empty() {
            warn!(symbol = %intent.symbol, reason = %intent.reason, "venue placed no order");
            return Ok(order_ids);
        }

        info!(
            symbol = %intent.symbol,
            order_ids = ?order_ids,
            quantity = intent.signed_quantity,
            limit_price = ?intent.limit_price,
            reason = %intent.reason,
            "order submitted"
        );
        state.open_order = Some(OpenOrder {
            order_ids: order_ids.clone(),
            reason: intent.reason,
            quantity: intent.signed_quantity,
            limit_price: intent.limit_price,
            filled_quantity: 0,
            unit_counted: false,
        });
        Ok(order_ids)
    }

    /// Cancel the open order (if any) at the venue and retire it.
    pub fn cancel<V: ExecutionVenue + ?Sized>(
        &self,
        symbol: &str,
        state: &mut InstrumentState,
        venue: &mut V,
        why: &str,
    ) -> Option<OpenOrder> {
        let open = state.open_order.take()?;
        venue.cancel_open_orders(symbol);
        info!(symbol, order_ids = ?open.order_ids, reason = %open.reason, why, "open order canceled");
        for id in &open.order_ids {
            if state.retired_orders.len() == MAX_RETIRED {
                state.retired_orders.remove(0);
            }
            state.retired_orders.push(*id);
        }
        Some(open)
    }

    /// Apply one venue event to the instrument.
    pub fn on_fill(&self, state: &mut InstrumentState, event: &FillEvent) -> FillOutcome {
        let symbol = event.symbol.as_str();
        let order_id = event.order_id;

        match event.status {
            FillStatus::Invalid => {
                warn!(symbol, %order_id, "order rejected by venue (invalid)");
                return FillOutcome::Ignored;
            }
            FillStatus::Canceled => {
                if let Some(pos) = state.retired_orders.iter().position(|id| *id == order_id) {
                    state.retired_orders.remove(pos);
                    debug!(symbol, %order_id, "retired order cancel confirmed");
                } else {
                    warn!(symbol, %order_id, "cancel event ignored");
                }
                return FillOutcome::Ignored;
            }
            FillStatus::PartiallyFilled | FillStatus::Filled => {}
        }

        let tracked = state.open_order.as_ref().is_some_and(|o| o.contains(order_id));
        if !tracked {
            return self.reconcile_untracked(state, event);
        }

        let Some(open) = state.open_order.as_mut() else {
            return FillOutcome::Ignored;
        };
        // shares are real under either policy
        open.filled_quantity += event.fill_quantity;
        state.holding_quantity += event.fill_quantity;

        if event.status == FillStatus::PartiallyFilled && self.partial_fills == PartialFillPolicy::Ignore {
            warn!(
                symbol,
                %order_id,
                quantity = event.fill_quantity,
                holding = state.holding_quantity,
                "partial fill counted toward holdings"
            );
            return FillOutcome::Applied;
        }

        if open.reason.is_liquidation() {
            state.last_fill_price = None;
            state.position_units = 0;
        } else {
            state.last_fill_price = Some(event.fill_price);
            if !open.unit_counted {
                open.unit_counted = true;
                state.position_units += 1;
            }
        }

        if event.status == FillStatus::PartiallyFilled {
            info!(symbol, %order_id, price = event.fill_price, quantity = event.fill_quantity, "partial fill applied");
            return FillOutcome::Applied;
        }

        open.order_ids.retain(|id| *id != order_id);
        let done = open.order_ids.is_empty();
        info!(
            symbol,
            %order_id,
            price = event.fill_price,
            quantity = event.fill_quantity,
            holding = state.holding_quantity,
            units = state.position_units,
            "fill applied"
        );
        if !done {
            return FillOutcome::Applied;
        }
        state.open_order = None;
        if state.last_fill_price.is_none() && state.holding_quantity != 0 {
            warn!(symbol, holding = state.holding_quantity, "position not flat after liquidation");
        }
        FillOutcome::Completed
    }

    fn reconcile_untracked(&self, state: &mut InstrumentState, event: &FillEvent) -> FillOutcome {
        let symbol = event.symbol.as_str();
        let order_id = event.order_id;
        let Some(pos) = state.retired_orders.iter().position(|id| *id == order_id) else {
            warn!(symbol, %order_id, "fill for unknown order ignored");
            return FillOutcome::Ignored;
        };
        if event.status == FillStatus::Filled {
            state.retired_orders.remove(pos);
        }
        state.holding_quantity += event.fill_quantity;
        warn!(
            symbol,
            %order_id,
            quantity = event.fill_quantity,
            holding = state.holding_quantity,
            "late fill of canceled order"
        );
        FillOutcome::Reconciled
    }
}
