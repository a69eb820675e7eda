//! Pairwise correlation sources.
//!
//! Correlation data comes from outside the engine (a historical
//! covariance feed, typically). The trait keeps the portfolio
//! evaluator deterministic: with no source wired in, correlation risk
//! reads as low with an explanatory message instead of being
//! synthesized.

use std::collections::HashMap;

/// Provider of pairwise return correlations between symbols.
pub trait CorrelationSource: Send + Sync {
    /// Correlation in [-1, 1] between two symbols, if known.
    fn pairwise(&self, a: &str, b: &str) -> Option<f64>;
}

/// Source with no data; every lookup misses.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCorrelationData;

impl CorrelationSource for NoCorrelationData {
    fn pairwise(&self, _a: &str, _b: &str) -> Option<f64> {
        None
    }
}

/// Static symmetric correlation table, for callers that precompute
/// correlations from historical returns.
#[derive(Debug, Default, Clone)]
pub struct CorrelationTable {
    pairs: HashMap<(String, String), f64>,
}

impl CorrelationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a symmetric pairwise correlation.
    pub fn insert(&mut self, a: impl Into<String>, b: impl Into<String>, correlation: f64) {
        let (a, b) = ordered(a.into(), b.into());
        self.pairs.insert((a, b), correlation.clamp(-1.0, 1.0));
    }

    /// Builder-style `insert`.
    pub fn with_pair(mut self, a: impl Into<String>, b: impl Into<String>, correlation: f64) -> Self {
        self.insert(a, b, correlation);
        self
    }
}

impl CorrelationSource for CorrelationTable {
    fn pairwise(&self, a: &str, b: &str) -> Option<f64> {
        if a == b {
            return Some(1.0);
        }
        let (a, b) = ordered(a.to_string(), b.to_string());
        self.pairs.get(&(a, b)).copied()
    }
}

fn ordered(a: String, b: String) -> (String, String) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
