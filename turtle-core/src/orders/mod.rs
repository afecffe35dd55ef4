//! Order management
//!
//! Provides the execution venue seam and the coordinator that keeps at most
//! one open order per instrument and reconciles venue fill events.

pub mod coordinator;
pub mod venue;

pub use coordinator::{FillOutcome, OpenOrder, OrderCoordinator, OrderError};
pub use venue::ExecutionVenue;
