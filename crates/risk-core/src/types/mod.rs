//! Domain types shared across the risk engine.

pub mod assessment;
pub mod market;
pub mod portfolio;
pub mod trade;

pub use assessment::{
    AdjustmentAction, AlertSeverity, MarketRiskFactors, PortfolioMetrics, PortfolioRiskFactors,
    PortfolioRiskReport, PositionAdjustment, PositionRiskFactors, Recommendation,
    RecommendationAction, RegimeFactor, RiskAlert, RiskAlertKind, RiskAssessment, RiskFactor,
    RiskFactors, RiskLevel,
};
pub use market::{MarketRegime, MarketSnapshot};
pub use portfolio::{Holding, PortfolioSnapshot};
pub use trade::{TradeAction, TradeProposal};
