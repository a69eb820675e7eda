//! Risk factor, assessment, and monitoring report types.
//!
//! These are the outbound contract of the engine: every field here is
//! serialized for dashboards, order-placement code, and alerting.

use crate::types::market::MarketRegime;
use crate::types::trade::TradeAction;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ordinal risk level. Ordering follows increasing risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    /// Map an aggregate score in [0, 1] to a level. The 0.6 boundary is
    /// the trade gate: anything above it blocks.
    pub fn from_score(score: f64) -> Self {
        if score > 0.7 {
            RiskLevel::VeryHigh
        } else if score > 0.6 {
            RiskLevel::High
        } else if score > 0.4 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// One scored risk dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFactor {
    pub level: RiskLevel,
    /// Normalized score in [0, 1]; higher is riskier.
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RiskFactor {
    /// Create a factor, clamping the score into [0, 1].
    pub fn new(level: RiskLevel, score: f64) -> Self {
        Self {
            level,
            score: score.clamp(0.0, 1.0),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The neutral factor substituted when an evaluator fails.
    pub fn neutral(message: impl Into<String>) -> Self {
        Self::new(RiskLevel::Medium, 0.5).with_message(message)
    }
}

/// Market regime sub-factor: a scored factor plus the regime label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeFactor {
    #[serde(flatten)]
    pub factor: RiskFactor,
    pub regime: MarketRegime,
}

impl RegimeFactor {
    pub fn from_regime(regime: MarketRegime) -> Self {
        let score = regime.risk_score();
        let level = if score > 0.7 {
            RiskLevel::High
        } else if score < 0.3 {
            RiskLevel::Low
        } else {
            RiskLevel::Medium
        };
        Self {
            factor: RiskFactor::new(level, score),
            regime,
        }
    }
}

/// Market-risk sub-factors. Volatility, volume liquidity, and trend are
/// only present when the snapshot carries the underlying data; the
/// regime is always classified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketRiskFactors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volatility: Option<RiskFactor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquidity: Option<RiskFactor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<RiskFactor>,
    pub market_regime: RegimeFactor,
}

impl MarketRiskFactors {
    /// Arithmetic mean over the sub-factors that are present.
    pub fn mean_score(&self) -> Option<f64> {
        let scores: Vec<f64> = [
            self.volatility.as_ref().map(|f| f.score),
            self.liquidity.as_ref().map(|f| f.score),
            self.trend.as_ref().map(|f| f.score),
            Some(self.market_regime.factor.score),
        ]
        .into_iter()
        .flatten()
        .collect();
        mean(&scores)
    }
}

/// Position-risk sub-factors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionRiskFactors {
    pub size: RiskFactor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concentration: Option<RiskFactor>,
}

impl PositionRiskFactors {
    pub fn mean_score(&self) -> Option<f64> {
        let scores: Vec<f64> = [
            Some(self.size.score),
            self.concentration.as_ref().map(|f| f.score),
        ]
        .into_iter()
        .flatten()
        .collect();
        mean(&scores)
    }
}

/// Portfolio-risk sub-factors. Drawdown and diversification only appear
/// when they breach their thresholds, matching the alert-style shape of
/// the outbound contract; correlation is always evaluated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioRiskFactors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drawdown: Option<RiskFactor>,
    pub correlation: RiskFactor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diversification: Option<RiskFactor>,
}

impl PortfolioRiskFactors {
    pub fn mean_score(&self) -> Option<f64> {
        let scores: Vec<f64> = [
            self.drawdown.as_ref().map(|f| f.score),
            Some(self.correlation.score),
            self.diversification.as_ref().map(|f| f.score),
        ]
        .into_iter()
        .flatten()
        .collect();
        mean(&scores)
    }
}

fn mean(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}

/// The five risk categories feeding the aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFactors {
    pub market_risk: MarketRiskFactors,
    pub position_risk: PositionRiskFactors,
    pub portfolio_risk: PortfolioRiskFactors,
    pub liquidity_risk: RiskFactor,
    pub volatility_risk: RiskFactor,
}

impl RiskFactors {
    /// All-neutral factors for degraded assessments. Same shape as a
    /// healthy result; only the scores and messages differ.
    pub fn neutral(message: &str) -> Self {
        Self {
            market_risk: MarketRiskFactors {
                volatility: None,
                liquidity: None,
                trend: None,
                market_regime: RegimeFactor {
                    factor: RiskFactor::neutral(message),
                    regime: MarketRegime::Normal,
                },
            },
            position_risk: PositionRiskFactors {
                size: RiskFactor::neutral(message),
                concentration: None,
            },
            portfolio_risk: PortfolioRiskFactors {
                drawdown: None,
                correlation: RiskFactor::neutral(message),
                diversification: None,
            },
            liquidity_risk: RiskFactor::neutral(message),
            volatility_risk: RiskFactor::neutral(message),
        }
    }
}

/// What to do about a trade that failed the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentAction {
    Reduce,
    Proceed,
    Hold,
}

/// Recommended quantity adjustment for a gated trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionAdjustment {
    pub action: AdjustmentAction,
    pub current_quantity: Decimal,
    pub recommended_quantity: Decimal,
    /// Percentage reduction from the proposed quantity, when reducing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduction_percent: Option<f64>,
    pub reason: String,
}

/// Complete risk assessment for one proposed trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub symbol: String,
    pub action: TradeAction,
    pub proposed_quantity: Decimal,
    pub current_price: Decimal,
    pub timestamp: DateTime<Utc>,
    pub risk_factors: RiskFactors,
    /// Weighted aggregate in [0, 1].
    pub overall_risk_score: f64,
    pub overall_risk_level: RiskLevel,
    /// The gate: false blocks the trade as proposed.
    pub can_proceed: bool,
    pub recommended_stop_loss: Decimal,
    pub recommended_take_profit: Decimal,
    pub recommended_position_size: Decimal,
    /// Present only when the gate failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_adjustment: Option<PositionAdjustment>,
    pub warnings: Vec<String>,
}

/// Severity of a monitoring alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

/// Kind of portfolio risk alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskAlertKind {
    DrawdownWarning,
    ConcentrationWarning,
}

/// A portfolio-level risk alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAlert {
    #[serde(rename = "type")]
    pub kind: RiskAlertKind,
    pub message: String,
    pub severity: AlertSeverity,
}

/// Action recommended by the portfolio monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationAction {
    Diversify,
}

/// A portfolio-level recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: RecommendationAction,
    pub message: String,
    pub priority: AlertSeverity,
}

/// Metrics computed on every monitoring pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    pub current_drawdown: f64,
    pub concentration_index: f64,
    pub diversification_score: f64,
    pub total_positions: usize,
    pub portfolio_value: Decimal,
}

/// Output of one portfolio monitoring pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioRiskReport {
    pub timestamp: DateTime<Utc>,
    pub portfolio_metrics: PortfolioMetrics,
    pub risk_alerts: Vec<RiskAlert>,
    pub recommendations: Vec<Recommendation>,
}
