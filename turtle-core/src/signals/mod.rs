//! Signal evaluation — the per-bar entry/add/exit/stop decision.

pub mod turtle;

pub use turtle::{Action, EvaluationContext, SignalEvaluator};
