//! Position risk: proposed size relative to the portfolio, plus
//! concentration of existing holdings.

use risk_core::types::{PortfolioSnapshot, PositionRiskFactors, RiskFactor, RiskLevel, TradeProposal};
use risk_core::{Error, Result, RiskConfig};
use rust_decimal::prelude::ToPrimitive;

/// HHI above which the portfolio counts as concentrated.
const CONCENTRATION_THRESHOLD: f64 = 0.5;

pub fn evaluate(
    config: &RiskConfig,
    proposal: &TradeProposal,
    portfolio: &PortfolioSnapshot,
) -> Result<PositionRiskFactors> {
    let position_size = (proposal.notional() / portfolio.safe_total_value())
        .to_f64()
        .ok_or_else(|| Error::Numeric("position size ratio".to_string()))?;

    let size = if position_size > config.max_position_size {
        RiskFactor::new(RiskLevel::VeryHigh, 0.9).with_message(format!(
            "Position size {:.1}% exceeds maximum {:.1}%",
            position_size * 100.0,
            config.max_position_size * 100.0
        ))
    } else if position_size > config.max_position_size * 0.8 {
        RiskFactor::new(RiskLevel::High, 0.7).with_message(format!(
            "Position size {:.1}% approaching maximum",
            position_size * 100.0
        ))
    } else {
        RiskFactor::new(RiskLevel::Low, 0.3).with_message(format!(
            "Position size {:.1}% within limits",
            position_size * 100.0
        ))
    };

    let concentration = (portfolio.concentration() > CONCENTRATION_THRESHOLD).then(|| {
        RiskFactor::new(RiskLevel::High, 0.8).with_message("High portfolio concentration")
    });

    Ok(PositionRiskFactors { size, concentration })
}
