//! Configuration for the risk assessment engine.
//!
//! All thresholds and budgets are plain fractions of portfolio value
//! unless noted. The engine treats the configuration as read-only; the
//! only mutation path is `RiskEngine::update_config`, which re-runs
//! `validate` before swapping.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

/// Thresholds and budgets for risk assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Maximum fraction of portfolio value risked per trade.
    pub max_portfolio_risk: f64,
    /// Maximum fraction of portfolio value in a single position.
    pub max_position_size: f64,
    /// Maximum daily loss fraction before trading should halt.
    pub max_daily_loss: f64,
    /// Maximum tolerated portfolio drawdown fraction.
    pub max_drawdown: f64,

    /// Fixed stop-loss distance when volatility adjustment is off.
    pub default_stop_loss: f64,
    /// Scale stop distance by current volatility (2x volatility).
    pub volatility_adjusted_stops: bool,

    /// Pairwise correlation above which two positions count as correlated.
    pub max_correlation: f64,

    /// Volatility above this is high-risk.
    pub volatility_threshold_high: f64,
    /// Volatility below this is low-risk.
    pub volatility_threshold_low: f64,
    /// Neutral volatility assumed when market data is missing.
    pub default_volatility: f64,

    /// Position count considered fully diversified.
    pub diversification_target: usize,

    /// Fraction of max_drawdown at which the monitor raises a warning.
    pub drawdown_alert_ratio: f64,
    /// HHI above which the monitor flags concentration.
    pub concentration_alert_threshold: f64,
    /// Diversification score below which the monitor recommends diversifying.
    pub diversification_alert_threshold: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            max_portfolio_risk: 0.05,
            max_position_size: 0.10,
            max_daily_loss: 0.03,
            max_drawdown: 0.15,

            default_stop_loss: 0.03,
            volatility_adjusted_stops: true,

            max_correlation: 0.7,

            volatility_threshold_high: 0.05,
            volatility_threshold_low: 0.01,
            default_volatility: 0.02,

            diversification_target: 10,

            drawdown_alert_ratio: 0.8,
            concentration_alert_threshold: 0.6,
            diversification_alert_threshold: 0.3,
        }
    }
}

impl RiskConfig {
    /// Load configuration from `RISK_*` environment variables, layered
    /// over the defaults. Unset variables keep their default; malformed
    /// values are logged and skipped.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        overlay_f64("RISK_MAX_PORTFOLIO_RISK", &mut config.max_portfolio_risk);
        overlay_f64("RISK_MAX_POSITION_SIZE", &mut config.max_position_size);
        overlay_f64("RISK_MAX_DAILY_LOSS", &mut config.max_daily_loss);
        overlay_f64("RISK_MAX_DRAWDOWN", &mut config.max_drawdown);
        overlay_f64("RISK_DEFAULT_STOP_LOSS", &mut config.default_stop_loss);
        overlay_bool(
            "RISK_VOLATILITY_ADJUSTED_STOPS",
            &mut config.volatility_adjusted_stops,
        );
        overlay_f64("RISK_MAX_CORRELATION", &mut config.max_correlation);
        overlay_f64(
            "RISK_VOLATILITY_THRESHOLD_HIGH",
            &mut config.volatility_threshold_high,
        );
        overlay_f64(
            "RISK_VOLATILITY_THRESHOLD_LOW",
            &mut config.volatility_threshold_low,
        );
        overlay_f64("RISK_DEFAULT_VOLATILITY", &mut config.default_volatility);

        config.validate()?;
        Ok(config)
    }

    /// Check that every threshold is inside its legal range.
    pub fn validate(&self) -> Result<()> {
        let fractions = [
            ("max_portfolio_risk", self.max_portfolio_risk),
            ("max_position_size", self.max_position_size),
            ("max_daily_loss", self.max_daily_loss),
            ("max_drawdown", self.max_drawdown),
            ("default_stop_loss", self.default_stop_loss),
            ("max_correlation", self.max_correlation),
            ("drawdown_alert_ratio", self.drawdown_alert_ratio),
            (
                "concentration_alert_threshold",
                self.concentration_alert_threshold,
            ),
            (
                "diversification_alert_threshold",
                self.diversification_alert_threshold,
            ),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) || value == 0.0 {
                return Err(Error::Config {
                    message: format!("{name} must be in (0, 1], got {value}"),
                });
            }
        }

        if self.default_volatility <= 0.0 {
            return Err(Error::Config {
                message: format!(
                    "default_volatility must be positive, got {}",
                    self.default_volatility
                ),
            });
        }
        if self.volatility_threshold_low >= self.volatility_threshold_high {
            return Err(Error::Config {
                message: format!(
                    "volatility_threshold_low ({}) must be below volatility_threshold_high ({})",
                    self.volatility_threshold_low, self.volatility_threshold_high
                ),
            });
        }
        if self.diversification_target == 0 {
            return Err(Error::Config {
                message: "diversification_target must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

fn overlay_f64(name: &str, slot: &mut f64) {
    if let Ok(raw) = env::var(name) {
        match raw.parse() {
            Ok(value) => *slot = value,
            Err(_) => warn!(variable = name, value = %raw, "Ignoring unparseable config override"),
        }
    }
}

fn overlay_bool(name: &str, slot: &mut bool) {
    if let Ok(raw) = env::var(name) {
        match raw.parse() {
            Ok(value) => *slot = value,
            Err(_) => warn!(variable = name, value = %raw, "Ignoring unparseable config override"),
        }
    }
}
