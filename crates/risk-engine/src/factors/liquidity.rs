//! Liquidity risk: proposed trade value relative to 24h volume.

use risk_core::types::{MarketSnapshot, RiskFactor, RiskLevel, TradeProposal};
use risk_core::{Error, Result, RiskConfig};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

pub fn evaluate(
    _config: &RiskConfig,
    proposal: &TradeProposal,
    market: &MarketSnapshot,
) -> Result<RiskFactor> {
    let daily_volume = match market.volume_24h {
        Some(volume) if volume > Decimal::ZERO => volume,
        _ => {
            return Ok(RiskFactor::new(RiskLevel::Medium, 0.5)
                .with_message("Insufficient volume data"));
        }
    };

    // The snapshot price is preferred; a missing one falls back to the
    // proposal's own price rather than zeroing the trade value.
    let price = market.current_price.unwrap_or(proposal.price);
    let trade_value = proposal.quantity * price;
    let ratio = (trade_value / daily_volume)
        .to_f64()
        .ok_or_else(|| Error::Numeric("trade-to-volume ratio".to_string()))?;

    Ok(if ratio > 0.05 {
        RiskFactor::new(RiskLevel::High, 0.8)
            .with_message("High liquidity risk - large trade relative to daily volume")
    } else if ratio > 0.01 {
        RiskFactor::new(RiskLevel::Medium, 0.5).with_message("Moderate liquidity risk")
    } else {
        RiskFactor::new(RiskLevel::Low, 0.2).with_message("Low liquidity risk")
    })
}
