//! Domain types for the turtle engine

pub mod bar;
pub mod fill;
pub mod ids;
pub mod instrument;
pub mod order;

pub use bar::Bar;
pub use fill::{FillEvent, FillStatus};
pub use ids::{ConfigHash, InstrumentId, OrderId};
pub use instrument::{AssetClass, Instrument};
pub use order::{OrderIntent, OrderReason};
