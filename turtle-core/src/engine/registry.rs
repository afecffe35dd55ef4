//! Instrument registry and host entry points.

use crate::config::{ConfigError, TurtleConfig};
use crate::domain::{Bar, ConfigHash, FillEvent, Instrument, InstrumentId, OrderIntent};
use crate::engine::state::InstrumentState;
use crate::engine::warmup::WarmupState;
use crate::fingerprint::config_hash;
use crate::indicators::{BreakoutChannel, VolatilityTracker};
use crate::orders::{ExecutionVenue, FillOutcome, OrderCoordinator, OrderError};
use crate::signals::{Action, EvaluationContext, SignalEvaluator};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("instrument {0} is not registered")]
    UnknownInstrument(String),

    #[error("instrument {0} is already registered")]
    DuplicateInstrument(String),

    #[error("bar for {symbol} at {got} is older than the last bar at {last}")]
    OutOfOrderBar {
        symbol: String,
        last: DateTime<Utc>,
        got: DateTime<Utc>,
    },

    #[error("invalid engine config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error(transparent)]
    Order(#[from] OrderError),
}

/// Everything owned for one registered instrument.
#[derive(Debug, Clone)]
struct InstrumentSlot {
    instrument: Instrument,
    volatility: VolatilityTracker,
    channel: BreakoutChannel,
    warmup: WarmupState,
    state: InstrumentState,
}

/// The per-instrument decision engine.
///
/// Instruments get stable [`InstrumentId`] handles in registration order;
/// cross-instrument work (such as a session reset of every instrument) runs
/// in that order. Instruments are independent, so a multi-threaded host may
/// shard engines by instrument.
#[derive(Debug, Clone)]
pub struct TurtleEngine {
    config: TurtleConfig,
    fingerprint: ConfigHash,
    signal: SignalEvaluator,
    coordinator: OrderCoordinator,
    slots: Vec<InstrumentSlot>,
    index: HashMap<String, InstrumentId>,
}

impl TurtleEngine {
    pub fn new(config: TurtleConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let fingerprint = config_hash(&config);
        info!(
            config = fingerprint.short(),
            atr_period = config.atr_period,
            entry_window = config.entry_window,
            exit_window = config.exit_window,
            "turtle engine created"
        );
        Ok(Self {
            signal: SignalEvaluator::new(&config),
            coordinator: OrderCoordinator::new(config.partial_fills),
            fingerprint,
            config,
            slots: Vec::new(),
            index: HashMap::new(),
        })
    }

    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    pub fn fingerprint(&self) -> &ConfigHash {
        &self.fingerprint
    }

    /// Register an instrument. Bars and fills for unregistered symbols are
    /// rejected, so registration must precede data.
    pub fn register(&mut self, instrument: Instrument) -> Result<InstrumentId, EngineError> {
        if self.index.contains_key(&instrument.symbol) {
            return Err(EngineError::DuplicateInstrument(instrument.symbol));
        }
        let id = InstrumentId(self.slots.len());
        info!(symbol = %instrument.symbol, id = %id, feed = %instrument.feed, "instrument registered");
        self.index.insert(instrument.symbol.clone(), id);
        self.slots.push(InstrumentSlot {
            volatility: VolatilityTracker::new(self.config.atr_period, self.config.true_range),
            channel: BreakoutChannel::new(
                self.config.entry_window,
                self.config.exit_window,
                self.config.channel_source,
            ),
            warmup: WarmupState::from_config(&self.config),
            state: InstrumentState::new(),
            instrument,
        });
        Ok(id)
    }

    pub fn instrument_id(&self, symbol: &str) -> Option<InstrumentId> {
        self.index.get(symbol).copied()
    }

    pub fn instrument(&self, id: InstrumentId) -> Option<&Instrument> {
        self.slots.get(id.0).map(|s| &s.instrument)
    }

    pub fn state(&self, id: InstrumentId) -> Option<&InstrumentState> {
        self.slots.get(id.0).map(|s| &s.state)
    }

    pub fn state_of(&self, symbol: &str) -> Option<&InstrumentState> {
        self.instrument_id(symbol).and_then(|id| self.state(id))
    }

    /// Registered instruments in registration order.
    pub fn instruments(&self) -> impl Iterator<Item = (InstrumentId, &Instrument)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, s)| (InstrumentId(i), &s.instrument))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Bars still needed before the instrument can trade.
    pub fn bars_until_warm(&self, id: InstrumentId) -> Option<usize> {
        self.slots.get(id.0).map(|s| s.warmup.remaining())
    }

    fn lookup(&self, symbol: &str) -> Result<InstrumentId, EngineError> {
        self.instrument_id(symbol)
            .ok_or_else(|| EngineError::UnknownInstrument(symbol.to_string()))
    }

    /// Process one consolidated bar. Returns the order intent sent to the
    /// venue, if any.
    pub fn on_bar<V: ExecutionVenue + ?Sized>(
        &mut self,
        bar: &Bar,
        venue: &mut V,
    ) -> Result<Option<OrderIntent>, EngineError> {
        let id = self.lookup(&bar.symbol)?;
        let auto_reset = self.config.auto_session_reset;
        let signal = &self.signal;
        let coordinator = &self.coordinator;
        let slot = &mut self.slots[id.0];

        if let Some(last) = slot.state.last_bar_time {
            if bar.end_time < last {
                return Err(EngineError::OutOfOrderBar {
                    symbol: bar.symbol.clone(),
                    last,
                    got: bar.end_time,
                });
            }
        }
        if !bar.is_sane() {
            warn!(symbol = %bar.symbol, end_time = %bar.end_time, "skipping void or malformed bar");
            return Ok(None);
        }

        let session = bar.session_date();
        match slot.state.session_date {
            None => slot.state.session_date = Some(session),
            Some(current) if auto_reset && current != session => {
                reset_slot(coordinator, slot, session, venue);
            }
            Some(_) => {}
        }

        let n = slot.volatility.update(bar);
        let prior = slot.channel.levels();
        slot.warmup.observe();
        slot.state.n = n;
        slot.state.last_bar_time = Some(bar.end_time);

        let action = match (n, prior) {
            (Some(n), Some(channel)) if slot.warmup.is_warm() => {
                let ctx = EvaluationContext {
                    bar,
                    n,
                    channel,
                    position_units: slot.state.position_units,
                    holding_quantity: slot.state.holding_quantity,
                    last_fill_price: slot.state.last_fill_price,
                    open_order: slot.state.open_order.as_ref().map(|o| o.reason),
                    instrument: &slot.instrument,
                };
                let action = signal.evaluate(&ctx);
                debug!(
                    symbol = %bar.symbol,
                    n,
                    max_channel = channel.max,
                    min_channel = channel.min,
                    high = bar.high,
                    low = bar.low,
                    action = ?action,
                    "bar evaluated"
                );
                action
            }
            _ => {
                debug!(
                    symbol = %bar.symbol,
                    bars_until_warm = slot.warmup.remaining(),
                    pending = ?slot.warmup.pending(),
                    "warming up"
                );
                None
            }
        };

        let intent = match action {
            Some(action) => apply_action(coordinator, slot, action, venue)?,
            None => None,
        };

        let levels = slot.channel.update(bar);
        slot.state.max_channel = levels.map(|l| l.max);
        slot.state.min_channel = levels.map(|l| l.min);

        debug_assert_eq!(
            slot.state.invariant_violation(self.config.position_cap),
            None,
            "instrument state invariant violated for {}",
            bar.symbol
        );
        Ok(intent)
    }

    /// Apply one venue event.
    pub fn on_fill(&mut self, event: &FillEvent) -> Result<FillOutcome, EngineError> {
        let id = self.lookup(&event.symbol)?;
        let slot = &mut self.slots[id.0];
        let outcome = self.coordinator.on_fill(&mut slot.state, event);
        debug_assert_eq!(slot.state.invariant_violation(self.config.position_cap), None);
        Ok(outcome)
    }

    /// Session boundary for one instrument: cancel any stale order and clear
    /// per-session state before the session's first bar.
    pub fn start_session<V: ExecutionVenue + ?Sized>(
        &mut self,
        symbol: &str,
        date: NaiveDate,
        venue: &mut V,
    ) -> Result<(), EngineError> {
        let id = self.lookup(symbol)?;
        reset_slot(&self.coordinator, &mut self.slots[id.0], date, venue);
        Ok(())
    }

    /// Session boundary for every instrument, in registration order.
    pub fn start_session_all<V: ExecutionVenue + ?Sized>(&mut self, date: NaiveDate, venue: &mut V) {
        for slot in &mut self.slots {
            reset_slot(&self.coordinator, slot, date, venue);
        }
    }
}

fn reset_slot<V: ExecutionVenue + ?Sized>(
    coordinator: &OrderCoordinator,
    slot: &mut InstrumentSlot,
    date: NaiveDate,
    venue: &mut V,
) {
    let symbol = slot.instrument.symbol.as_str();
    if let Some(stale) = coordinator.cancel(symbol, &mut slot.state, venue, "session reset") {
        warn!(symbol, order_ids = ?stale.order_ids, reason = %stale.reason, "stale order canceled at session start");
    }
    slot.state.reset_session(date);
    info!(symbol, %date, holding = slot.state.holding_quantity, "session reset");
}

fn apply_action<V: ExecutionVenue + ?Sized>(
    coordinator: &OrderCoordinator,
    slot: &mut InstrumentSlot,
    action: Action,
    venue: &mut V,
) -> Result<Option<OrderIntent>, EngineError> {
    let symbol = slot.instrument.symbol.clone();
    let reason = action.reason();
    let intent = match action {
        Action::Enter { quantity, limit_price } | Action::Add { quantity, limit_price } => {
            OrderIntent::buy_limit(symbol, quantity, limit_price, reason)
        }
        Action::Exit | Action::ForceQuit => {
            coordinator.cancel(&symbol, &mut slot.state, venue, reason.as_str());
            let intent = OrderIntent::liquidate(symbol, slot.state.holding_quantity, reason);
            slot.state.last_fill_price = None;
            slot.state.position_units = 0;
            info!(symbol = %intent.symbol, quantity = intent.signed_quantity, %reason, "liquidating");
            intent
        }
    };
    coordinator.submit(&mut slot.state, &intent, venue)?;
    Ok(Some(intent))
}
