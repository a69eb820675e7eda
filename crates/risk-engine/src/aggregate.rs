//! Weighted aggregation of the five risk categories into one score and
//! the trade gate.

use risk_core::types::{RiskFactors, RiskLevel};

/// Category weights. Position risk carries the most weight; the weights
/// sum to 1.0.
pub const MARKET_WEIGHT: f64 = 0.25;
pub const POSITION_WEIGHT: f64 = 0.30;
pub const PORTFOLIO_WEIGHT: f64 = 0.25;
pub const LIQUIDITY_WEIGHT: f64 = 0.10;
pub const VOLATILITY_WEIGHT: f64 = 0.10;

/// The gate threshold: scores strictly above this block the trade.
pub const GATE_THRESHOLD: f64 = 0.6;

/// Aggregated risk: score, level, and the gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverallRisk {
    pub score: f64,
    pub level: RiskLevel,
    pub can_proceed: bool,
}

/// Combine category scores with fixed weights. Composite categories
/// contribute the mean of their present sub-factors; a category with no
/// scored sub-factors drops out of both numerator and denominator. With
/// nothing scored at all the aggregate is neutral (0.5).
pub fn overall(factors: &RiskFactors) -> OverallRisk {
    let weighted = [
        (factors.market_risk.mean_score(), MARKET_WEIGHT),
        (factors.position_risk.mean_score(), POSITION_WEIGHT),
        (factors.portfolio_risk.mean_score(), PORTFOLIO_WEIGHT),
        (Some(factors.liquidity_risk.score), LIQUIDITY_WEIGHT),
        (Some(factors.volatility_risk.score), VOLATILITY_WEIGHT),
    ];

    let mut total_score = 0.0;
    let mut total_weight = 0.0;
    for (score, weight) in weighted {
        if let Some(score) = score {
            total_score += score * weight;
            total_weight += weight;
        }
    }

    let score = if total_weight > 0.0 {
        total_score / total_weight
    } else {
        0.5
    };

    OverallRisk {
        score,
        level: RiskLevel::from_score(score),
        can_proceed: score <= GATE_THRESHOLD,
    }
}
