//! Risk factor evaluators.
//!
//! Five independent scorers, each a pure function from market and
//! portfolio inputs to normalized `RiskFactor` values. Evaluators
//! return `Result`; the engine converts any failure to a neutral
//! MEDIUM factor at its boundary so aggregation always has a usable
//! value.

pub mod liquidity;
pub mod market;
pub mod portfolio;
pub mod position;
pub mod volatility;
