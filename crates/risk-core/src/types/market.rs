//! Market data snapshot and regime classification.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Point-in-time market data for a symbol.
///
/// Every field is optional: the evaluators read defensively and fall
/// back to documented neutral defaults, so a sparse snapshot degrades
/// scoring instead of failing it. The engine never mutates a snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Current (short-window) volatility as a fraction.
    pub volatility: Option<f64>,
    /// Long-window volatility baseline.
    pub historical_volatility: Option<f64>,
    /// Recent traded volume in base units.
    pub volume: Option<f64>,
    /// Average traded volume over the comparison window.
    pub average_volume: Option<f64>,
    /// Notional volume over the last 24 hours.
    pub volume_24h: Option<Decimal>,
    /// Trend strength in [0, 1]; 1 is a clean trend.
    pub trend_strength: Option<f64>,
    /// Last traded price.
    pub current_price: Option<Decimal>,
}

impl MarketSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    pub fn with_historical_volatility(mut self, historical_volatility: f64) -> Self {
        self.historical_volatility = Some(historical_volatility);
        self
    }

    pub fn with_volume(mut self, volume: f64, average_volume: f64) -> Self {
        self.volume = Some(volume);
        self.average_volume = Some(average_volume);
        self
    }

    pub fn with_volume_24h(mut self, volume_24h: Decimal) -> Self {
        self.volume_24h = Some(volume_24h);
        self
    }

    pub fn with_trend_strength(mut self, trend_strength: f64) -> Self {
        self.trend_strength = Some(trend_strength);
        self
    }

    pub fn with_current_price(mut self, current_price: Decimal) -> Self {
        self.current_price = Some(current_price);
        self
    }

    /// Volatility, defaulting to the supplied neutral value. Zero and
    /// negative readings count as missing so downstream ratios never
    /// divide by zero.
    pub fn volatility_or(&self, default: f64) -> f64 {
        match self.volatility {
            Some(v) if v > 0.0 => v,
            _ => default,
        }
    }

    /// Historical volatility, defaulting to the current reading.
    pub fn historical_volatility_or(&self, current: f64) -> f64 {
        match self.historical_volatility {
            Some(v) if v > 0.0 => v,
            _ => current,
        }
    }

    /// Trend strength, defaulting to the neutral midpoint.
    pub fn trend_strength_or_neutral(&self) -> f64 {
        self.trend_strength.unwrap_or(0.5)
    }
}

/// Coarse classification of current volatility/trend behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketRegime {
    LowVolTrending,
    Normal,
    HighVolRanging,
    HighVolBreakout,
}

impl MarketRegime {
    /// Classify a regime from volatility and trend strength.
    pub fn classify(volatility: f64, trend_strength: f64) -> Self {
        if volatility < 0.01 && trend_strength > 0.6 {
            MarketRegime::LowVolTrending
        } else if volatility > 0.06 {
            MarketRegime::HighVolBreakout
        } else if volatility > 0.04 && trend_strength < 0.4 {
            MarketRegime::HighVolRanging
        } else {
            MarketRegime::Normal
        }
    }

    /// Baseline risk score contributed by this regime.
    pub fn risk_score(self) -> f64 {
        match self {
            MarketRegime::LowVolTrending => 0.2,
            MarketRegime::Normal => 0.5,
            MarketRegime::HighVolRanging => 0.8,
            MarketRegime::HighVolBreakout => 0.9,
        }
    }
}
