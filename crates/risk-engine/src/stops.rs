//! Stop-loss and take-profit calculation.
//!
//! The stop distance scales with current volatility when
//! volatility-adjusted stops are enabled, otherwise it is the fixed
//! default. The take-profit always targets a 1:2 risk/reward ratio
//! against that stop distance.

use risk_core::types::{MarketSnapshot, TradeAction};
use risk_core::{Error, Result, RiskConfig};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Stop and target levels for one entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopLevels {
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
}

/// Compute stop-loss and take-profit for an entry at `price`.
pub fn levels(
    config: &RiskConfig,
    action: TradeAction,
    price: Decimal,
    market: &MarketSnapshot,
) -> Result<StopLevels> {
    let distance = if config.volatility_adjusted_stops {
        2.0 * market.volatility_or(config.default_volatility)
    } else {
        config.default_stop_loss
    };
    let distance = Decimal::from_f64(distance)
        .ok_or_else(|| Error::Numeric("stop distance".to_string()))?;
    let target_distance = distance * Decimal::TWO;

    let (stop_loss, take_profit) = if action.stops_below_entry() {
        (
            price * (Decimal::ONE - distance),
            price * (Decimal::ONE + target_distance),
        )
    } else {
        (
            price * (Decimal::ONE + distance),
            price * (Decimal::ONE - target_distance),
        )
    };

    Ok(StopLevels {
        stop_loss: stop_loss.round_dp(6),
        take_profit: take_profit.round_dp(6),
    })
}
