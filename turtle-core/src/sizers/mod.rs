//! Position sizing — determine trade quantity
//!
//! Sizers translate a risk budget and the current volatility into share
//! quantities. They are signal-agnostic: the evaluator decides *whether* to
//! trade, the sizer decides *how much*.

pub mod atr_risk;

pub use atr_risk::UnitSizer;
