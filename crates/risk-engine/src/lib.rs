//! Risk Engine
//!
//! Risk-weighted trade decisioning: factor evaluation, weighted
//! aggregation, position sizing, stop/target calculation, and
//! continuous portfolio monitoring.
//!
//! The engine is a pure, synchronous scoring function over the inputs
//! it is given. It never fetches data, never executes orders, and
//! never returns an error to its caller: degraded inputs and internal
//! failures fall back to a neutral assessment, distinguishable only by
//! its `warnings` list.

pub mod adjustment;
pub mod aggregate;
pub mod correlation;
pub mod engine;
pub mod factors;
pub mod monitor;
pub mod regime;
pub mod sizing;
pub mod stops;

pub use correlation::{CorrelationSource, CorrelationTable, NoCorrelationData};
pub use engine::RiskEngine;
pub use regime::{RegimeCache, RegimeEntry};
