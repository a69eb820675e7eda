//! Volatility-adjusted position sizing.
//!
//! Sizing works from the configured per-trade risk budget: low
//! volatility earns a larger multiplier, high volatility a smaller one,
//! and the resulting value is hard-capped at the maximum position size.

use risk_core::types::{MarketSnapshot, PortfolioSnapshot};
use risk_core::{Error, Result, RiskConfig};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Recommended trade quantity for the given price and conditions.
pub fn recommended_quantity(
    config: &RiskConfig,
    price: Decimal,
    portfolio: &PortfolioSnapshot,
    market: &MarketSnapshot,
) -> Result<Decimal> {
    let volatility = market.volatility_or(config.default_volatility);

    let risk_multiplier = if volatility > 0.04 {
        0.5
    } else if volatility < 0.01 {
        1.5
    } else {
        1.0
    };

    let portfolio_value = portfolio
        .safe_total_value()
        .to_f64()
        .ok_or_else(|| Error::Numeric("portfolio value".to_string()))?;
    let price_f64 = price
        .to_f64()
        .filter(|p| *p > 0.0)
        .ok_or_else(|| Error::Numeric("price".to_string()))?;

    let max_risk_amount = portfolio_value * config.max_portfolio_risk * risk_multiplier;
    let position_value = max_risk_amount / (volatility * 2.0);
    let capped_value = position_value.min(portfolio_value * config.max_position_size);

    let quantity = Decimal::from_f64(capped_value / price_f64)
        .ok_or_else(|| Error::Numeric("recommended quantity".to_string()))?;
    // Truncating keeps the quantity at or under the cap after rounding.
    Ok(quantity.round_dp_with_strategy(6, RoundingStrategy::ToZero))
}
