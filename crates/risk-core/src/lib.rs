//! Risk Core Library
//!
//! Shared domain types, error taxonomy, and configuration for the
//! trade risk assessment engine.

pub mod config;
pub mod error;
pub mod types;

pub use config::RiskConfig;
pub use error::{Error, Result};
