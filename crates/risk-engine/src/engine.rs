//! The risk engine: trade assessment and portfolio monitoring.

use crate::correlation::{CorrelationSource, NoCorrelationData};
use crate::regime::RegimeCache;
use crate::{adjustment, aggregate, factors, monitor, sizing, stops};
use chrono::Utc;
use risk_core::types::{
    MarketRegime, MarketRiskFactors, MarketSnapshot, PortfolioRiskFactors, PortfolioRiskReport,
    PortfolioSnapshot, PositionRiskFactors, RegimeFactor, RiskAssessment, RiskFactor, RiskFactors,
    RiskLevel, TradeAction, TradeProposal,
};
use risk_core::{Result, RiskConfig};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Warning attached to every degraded assessment.
const FALLBACK_WARNING: &str = "Using fallback risk assessment";

/// Risk-weighted trade decision engine.
///
/// Assessment is a pure, synchronous computation over its arguments;
/// the only shared mutable state is the injected [`RegimeCache`], whose
/// per-key writes are atomic. The engine never returns an error from
/// an assessment: degraded inputs produce a neutral result flagged in
/// `warnings` ("fail open").
pub struct RiskEngine {
    config: RiskConfig,
    regime_cache: Arc<RegimeCache>,
    correlations: Arc<dyn CorrelationSource>,
}

impl RiskEngine {
    /// Create an engine with a validated configuration, a private
    /// regime cache, and no correlation data.
    pub fn new(config: RiskConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            regime_cache: Arc::new(RegimeCache::new()),
            correlations: Arc::new(NoCorrelationData),
        })
    }

    /// Share an external regime cache (e.g. across engine instances or
    /// with an observer).
    pub fn with_regime_cache(mut self, cache: Arc<RegimeCache>) -> Self {
        self.regime_cache = cache;
        self
    }

    /// Wire in a real correlation source.
    pub fn with_correlation_source(mut self, source: Arc<dyn CorrelationSource>) -> Self {
        self.correlations = source;
        self
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    pub fn regime_cache(&self) -> &Arc<RegimeCache> {
        &self.regime_cache
    }

    /// Replace the configuration. The new configuration is validated
    /// before taking effect; on error the old one stays active.
    pub fn update_config(&mut self, config: RiskConfig) -> Result<()> {
        config.validate()?;
        info!("Risk configuration updated");
        self.config = config;
        Ok(())
    }

    /// Assess the risk of a proposed trade.
    ///
    /// Always returns an assessment. Evaluator failures degrade to
    /// neutral MEDIUM factors with a warning each; an invalid proposal
    /// degrades to the fallback assessment.
    pub fn assess_trade_risk(
        &self,
        proposal: &TradeProposal,
        market: &MarketSnapshot,
        portfolio: &PortfolioSnapshot,
    ) -> RiskAssessment {
        if let Err(e) = proposal.validate() {
            error!(symbol = %proposal.symbol, error = %e, "Invalid trade proposal, using fallback assessment");
            return self.fallback_assessment(proposal, portfolio);
        }

        let mut warnings = Vec::new();

        let market_risk = factors::market::evaluate(
            &self.config,
            &proposal.symbol,
            market,
            &self.regime_cache,
        )
        .unwrap_or_else(|e| {
            warn!(symbol = %proposal.symbol, error = %e, "Market risk evaluation failed");
            warnings.push(format!("Market risk evaluation failed: {e}"));
            neutral_market_factors(&e)
        });

        let position_risk = factors::position::evaluate(&self.config, proposal, portfolio)
            .unwrap_or_else(|e| {
                warn!(symbol = %proposal.symbol, error = %e, "Position risk evaluation failed");
                warnings.push(format!("Position risk evaluation failed: {e}"));
                PositionRiskFactors {
                    size: RiskFactor::neutral(e.to_string()),
                    concentration: None,
                }
            });

        let portfolio_risk = factors::portfolio::evaluate(
            &self.config,
            portfolio,
            &proposal.symbol,
            self.correlations.as_ref(),
        )
        .unwrap_or_else(|e| {
            warn!(symbol = %proposal.symbol, error = %e, "Portfolio risk evaluation failed");
            warnings.push(format!("Portfolio risk evaluation failed: {e}"));
            PortfolioRiskFactors {
                drawdown: None,
                correlation: RiskFactor::neutral(e.to_string()),
                diversification: None,
            }
        });

        let liquidity_risk = factors::liquidity::evaluate(&self.config, proposal, market)
            .unwrap_or_else(|e| {
                warn!(symbol = %proposal.symbol, error = %e, "Liquidity risk evaluation failed");
                warnings.push(format!("Liquidity risk evaluation failed: {e}"));
                RiskFactor::neutral(e.to_string())
            });

        let volatility_risk =
            factors::volatility::evaluate(&self.config, market).unwrap_or_else(|e| {
                warn!(symbol = %proposal.symbol, error = %e, "Volatility risk evaluation failed");
                warnings.push(format!("Volatility risk evaluation failed: {e}"));
                RiskFactor::neutral(e.to_string())
            });

        let risk_factors = RiskFactors {
            market_risk,
            position_risk,
            portfolio_risk,
            liquidity_risk,
            volatility_risk,
        };

        let overall = aggregate::overall(&risk_factors);

        let levels = stops::levels(&self.config, proposal.action, proposal.price, market)
            .unwrap_or_else(|e| {
                warn!(symbol = %proposal.symbol, error = %e, "Stop calculation failed, using defensive levels");
                warnings.push(format!("Stop calculation failed: {e}"));
                defensive_levels(proposal.action, proposal.price)
            });

        let recommended_position_size =
            sizing::recommended_quantity(&self.config, proposal.price, portfolio, market)
                .unwrap_or_else(|e| {
                    warn!(symbol = %proposal.symbol, error = %e, "Sizing failed, using defensive size");
                    warnings.push(format!("Position sizing failed: {e}"));
                    defensive_size(portfolio, proposal.price)
                });

        let recommended_adjustment = if overall.can_proceed {
            None
        } else {
            warnings.push("Trade requires adjustment before execution".to_string());
            Some(
                adjustment::suggest(&self.config, proposal, portfolio).unwrap_or_else(|e| {
                    warn!(symbol = %proposal.symbol, error = %e, "Adjustment calculation failed");
                    warnings.push(format!("Adjustment calculation failed: {e}"));
                    adjustment::hold_in_place(proposal)
                }),
            )
        };

        info!(
            symbol = %proposal.symbol,
            score = overall.score,
            level = ?overall.level,
            can_proceed = overall.can_proceed,
            "Trade risk assessed"
        );

        RiskAssessment {
            symbol: proposal.symbol.clone(),
            action: proposal.action,
            proposed_quantity: proposal.quantity,
            current_price: proposal.price,
            timestamp: Utc::now(),
            risk_factors,
            overall_risk_score: overall.score,
            overall_risk_level: overall.level,
            can_proceed: overall.can_proceed,
            recommended_stop_loss: levels.stop_loss,
            recommended_take_profit: levels.take_profit,
            recommended_position_size,
            recommended_adjustment,
            warnings,
        }
    }

    /// Run one portfolio monitoring pass, independent of any trade.
    pub fn monitor_portfolio_risk(&self, portfolio: &PortfolioSnapshot) -> PortfolioRiskReport {
        monitor::run(&self.config, portfolio)
    }

    /// Neutral assessment returned when scoring is impossible. Same
    /// shape as a healthy result; only `warnings` marks it degraded.
    fn fallback_assessment(
        &self,
        proposal: &TradeProposal,
        portfolio: &PortfolioSnapshot,
    ) -> RiskAssessment {
        let levels = defensive_levels(proposal.action, proposal.price);
        RiskAssessment {
            symbol: proposal.symbol.clone(),
            action: proposal.action,
            proposed_quantity: proposal.quantity,
            current_price: proposal.price,
            timestamp: Utc::now(),
            risk_factors: RiskFactors::neutral(FALLBACK_WARNING),
            overall_risk_score: 0.5,
            overall_risk_level: RiskLevel::Medium,
            can_proceed: true,
            recommended_stop_loss: levels.stop_loss,
            recommended_take_profit: levels.take_profit,
            recommended_position_size: defensive_size(portfolio, proposal.price),
            recommended_adjustment: None,
            warnings: vec![FALLBACK_WARNING.to_string()],
        }
    }
}

/// Fixed ±3% stop and ±6% target used when level calculation fails.
fn defensive_levels(action: TradeAction, price: Decimal) -> stops::StopLevels {
    if action.stops_below_entry() {
        stops::StopLevels {
            stop_loss: price * Decimal::new(97, 2),
            take_profit: price * Decimal::new(106, 2),
        }
    } else {
        stops::StopLevels {
            stop_loss: price * Decimal::new(103, 2),
            take_profit: price * Decimal::new(94, 2),
        }
    }
}

/// 2%-of-portfolio sizing used when the real calculation fails.
fn defensive_size(portfolio: &PortfolioSnapshot, price: Decimal) -> Decimal {
    if price <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (portfolio.safe_total_value() * Decimal::new(2, 2) / price).round_dp(6)
}

/// Market factors carrying only a neutral regime reading.
fn neutral_market_factors(error: &risk_core::Error) -> MarketRiskFactors {
    MarketRiskFactors {
        volatility: None,
        liquidity: None,
        trend: None,
        market_regime: RegimeFactor {
            factor: RiskFactor::neutral(error.to_string()),
            regime: MarketRegime::Normal,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn engine() -> RiskEngine {
        RiskEngine::new(RiskConfig::default()).unwrap()
    }

    fn proposal(quantity: i64, price: i64) -> TradeProposal {
        TradeProposal::new(
            "BTCUSDT",
            TradeAction::Buy,
            Decimal::new(quantity, 0),
            Decimal::new(price, 0),
        )
        .unwrap()
    }

    fn market() -> MarketSnapshot {
        MarketSnapshot::new()
            .with_volatility(0.02)
            .with_volume(1_000_000.0, 800_000.0)
            .with_trend_strength(0.6)
    }

    #[test]
    fn test_assessment_is_idempotent() {
        let engine = engine();
        let proposal = proposal(5, 100);
        let market = market();
        let portfolio = PortfolioSnapshot::new(Decimal::new(10_000, 0));

        let first = engine.assess_trade_risk(&proposal, &market, &portfolio);
        let second = engine.assess_trade_risk(&proposal, &market, &portfolio);

        assert_eq!(first.overall_risk_score, second.overall_risk_score);
        assert_eq!(first.overall_risk_level, second.overall_risk_level);
        assert_eq!(first.can_proceed, second.can_proceed);
        assert_eq!(first.recommended_stop_loss, second.recommended_stop_loss);
        assert_eq!(first.recommended_take_profit, second.recommended_take_profit);
        assert_eq!(
            first.recommended_position_size,
            second.recommended_position_size
        );
        assert_eq!(first.warnings, second.warnings);
    }

    #[test]
    fn test_invalid_proposal_fails_open() {
        let engine = engine();
        let mut bad = proposal(5, 100);
        bad.quantity = Decimal::ZERO;

        let assessment =
            engine.assess_trade_risk(&bad, &market(), &PortfolioSnapshot::default());
        assert!(assessment.can_proceed);
        assert_eq!(assessment.overall_risk_level, RiskLevel::Medium);
        assert_eq!(assessment.overall_risk_score, 0.5);
        assert!(assessment
            .warnings
            .iter()
            .any(|w| w == "Using fallback risk assessment"));
    }

    #[test]
    fn test_fallback_carries_defensive_sizing() {
        let engine = engine();
        let mut bad = proposal(5, 100);
        bad.symbol = String::new();

        let portfolio = PortfolioSnapshot::new(Decimal::new(10_000, 0));
        let assessment = engine.assess_trade_risk(&bad, &market(), &portfolio);

        // 2% of the $10,000 portfolio at price 100.
        assert_eq!(assessment.recommended_position_size, Decimal::new(2, 0));
        assert!(assessment.recommended_stop_loss > Decimal::ZERO);
    }

    #[test]
    fn test_adjustment_only_present_when_gated() {
        let engine = engine();
        let portfolio = PortfolioSnapshot::new(Decimal::new(10_000, 0));

        let small = engine.assess_trade_risk(&proposal(5, 100), &market(), &portfolio);
        assert!(small.can_proceed);
        assert!(small.recommended_adjustment.is_none());

        let oversized = engine.assess_trade_risk(&proposal(12, 100), &market(), &portfolio);
        assert!(!oversized.can_proceed);
        assert!(oversized.recommended_adjustment.is_some());
        assert!(oversized
            .warnings
            .iter()
            .any(|w| w == "Trade requires adjustment before execution"));
    }

    #[test]
    fn test_regime_cache_shared() {
        let cache = Arc::new(RegimeCache::new());
        let engine = RiskEngine::new(RiskConfig::default())
            .unwrap()
            .with_regime_cache(Arc::clone(&cache));

        engine.assess_trade_risk(
            &proposal(5, 100),
            &market(),
            &PortfolioSnapshot::new(Decimal::new(10_000, 0)),
        );
        assert!(cache.snapshot("BTCUSDT").is_some());
    }

    #[test]
    fn test_update_config_rejects_invalid() {
        let mut engine = engine();
        let mut bad = RiskConfig::default();
        bad.max_position_size = 2.0;

        assert!(engine.update_config(bad).is_err());
        // Old configuration stays active.
        assert!((engine.config().max_position_size - 0.10).abs() < 1e-12);

        let mut good = RiskConfig::default();
        good.max_position_size = 0.2;
        assert!(engine.update_config(good).is_ok());
        assert!((engine.config().max_position_size - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_empty_market_data_never_panics() {
        let engine = engine();
        let assessment = engine.assess_trade_risk(
            &proposal(5, 100),
            &MarketSnapshot::new(),
            &PortfolioSnapshot::default(),
        );
        assert!((0.0..=1.0).contains(&assessment.overall_risk_score));
    }
}
