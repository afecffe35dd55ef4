//! Turtle Core — per-instrument trend-following decision engine.
//!
//! This crate is embedded in a backtesting or live-trading host:
//! - Domain types (bars, instruments, order intents, fill events)
//! - Volatility tracker (smoothed true range, "N") and breakout channels
//! - Unit sizer bounded by risk and notional caps
//! - Signal evaluator: force-quit → exit → entry/add, first match wins
//! - Order coordinator: at most one open order per instrument, fill reconciliation
//! - Engine registry with `on_bar` / `on_fill` / `start_session` entry points
//!
//! The host supplies bars, the execution venue, and the session scheduler.

pub mod config;
pub mod domain;
pub mod engine;
pub mod fingerprint;
pub mod indicators;
pub mod orders;
pub mod signals;
pub mod sizers;

pub use config::TurtleConfig;
pub use engine::{EngineError, TurtleEngine};
