//! Volatility risk: current volatility relative to its historical
//! baseline.

use risk_core::types::{MarketSnapshot, RiskFactor, RiskLevel};
use risk_core::{Result, RiskConfig};

pub fn evaluate(config: &RiskConfig, market: &MarketSnapshot) -> Result<RiskFactor> {
    let volatility = market.volatility_or(config.default_volatility);
    let historical = market.historical_volatility_or(volatility);

    Ok(if volatility > historical * 1.5 {
        RiskFactor::new(RiskLevel::High, 0.8).with_message("High volatility relative to history")
    } else if volatility > historical * 1.2 {
        RiskFactor::new(RiskLevel::Medium, 0.6).with_message("Elevated volatility")
    } else {
        RiskFactor::new(RiskLevel::Low, 0.3).with_message("Normal volatility levels")
    })
}
