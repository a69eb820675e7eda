//! Market regime cache.
//!
//! Shared, keyed, mutable state written as a side effect of market-risk
//! evaluation. It is an explicit collaborator rather than engine
//! instance state so the scoring path itself stays pure; the `DashMap`
//! makes each per-symbol write an atomic read-modify-write, which is
//! the required concurrency discipline for concurrent assessors.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use risk_core::types::MarketRegime;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Last observed regime for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeEntry {
    pub regime: MarketRegime,
    pub risk_score: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Symbol-keyed regime observations.
#[derive(Debug, Default)]
pub struct RegimeCache {
    entries: DashMap<String, RegimeEntry>,
}

impl RegimeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the regime observed for a symbol, replacing any previous
    /// observation.
    pub fn record(&self, symbol: &str, regime: MarketRegime) {
        debug!(symbol, ?regime, "Recording market regime");
        self.entries.insert(
            symbol.to_string(),
            RegimeEntry {
                regime,
                risk_score: regime.risk_score(),
                recorded_at: Utc::now(),
            },
        );
    }

    /// Last observation for a symbol, if any.
    pub fn snapshot(&self, symbol: &str) -> Option<RegimeEntry> {
        self.entries.get(symbol).map(|e| e.value().clone())
    }

    /// Number of symbols with a recorded regime.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
