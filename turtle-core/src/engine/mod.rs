//! Turtle engine — per-instrument registry and the host-facing entry points.
//!
//! The host delivers one bar or one fill event at a time and each is processed
//! to completion before the next:
//!
//! 1. `on_bar`: session check → N update → channel snapshot → evaluate →
//!    submit/cancel/liquidate → channel insert
//! 2. `on_fill`: route the venue event to its instrument's coordinator
//! 3. `start_session`: clear per-session state and cancel stale orders

pub mod registry;
pub mod state;
pub mod warmup;

pub use registry::{EngineError, TurtleEngine};
pub use state::InstrumentState;
pub use warmup::WarmupState;
