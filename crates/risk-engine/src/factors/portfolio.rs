//! Portfolio risk: drawdown against the configured limit, correlation
//! with existing holdings, and diversification.

use crate::correlation::CorrelationSource;
use risk_core::types::{PortfolioRiskFactors, PortfolioSnapshot, RiskFactor, RiskLevel};
use risk_core::{Result, RiskConfig};

pub fn evaluate(
    config: &RiskConfig,
    portfolio: &PortfolioSnapshot,
    symbol: &str,
    correlations: &dyn CorrelationSource,
) -> Result<PortfolioRiskFactors> {
    let drawdown = (portfolio.current_drawdown > config.max_drawdown).then(|| {
        RiskFactor::new(RiskLevel::VeryHigh, 0.9).with_message(format!(
            "Current drawdown {:.1}% exceeds maximum",
            portfolio.current_drawdown * 100.0
        ))
    });

    let correlation = correlation_factor(config, portfolio, symbol, correlations);

    let diversification_score = portfolio.diversification_score(config.diversification_target);
    let diversification = (diversification_score < 0.3).then(|| {
        RiskFactor::new(RiskLevel::High, 0.8).with_message("Low portfolio diversification")
    });

    Ok(PortfolioRiskFactors {
        drawdown,
        correlation,
        diversification,
    })
}

/// Correlation of the proposed symbol against existing positions.
///
/// Positions without correlation data are excluded from the ratio; a
/// portfolio with no usable data degrades to a low-risk reading with an
/// explanatory message rather than a synthesized value.
fn correlation_factor(
    config: &RiskConfig,
    portfolio: &PortfolioSnapshot,
    symbol: &str,
    correlations: &dyn CorrelationSource,
) -> RiskFactor {
    if portfolio.positions.len() < 2 {
        return RiskFactor::new(RiskLevel::Low, 0.2)
            .with_message("Insufficient positions for correlation analysis");
    }

    let mut known = 0usize;
    let mut highly_correlated = 0usize;
    for held_symbol in portfolio.positions.keys() {
        if held_symbol == symbol {
            continue;
        }
        if let Some(correlation) = correlations.pairwise(symbol, held_symbol) {
            known += 1;
            if correlation > config.max_correlation {
                highly_correlated += 1;
            }
        }
    }

    if known == 0 {
        return RiskFactor::new(RiskLevel::Low, 0.2)
            .with_message("No correlation data available for existing positions");
    }

    let ratio = highly_correlated as f64 / known as f64;
    if ratio > 0.5 {
        RiskFactor::new(RiskLevel::High, 0.8).with_message(format!(
            "High correlation with {highly_correlated} existing positions"
        ))
    } else if ratio > 0.3 {
        RiskFactor::new(RiskLevel::Medium, 0.5).with_message(format!(
            "Moderate correlation with {highly_correlated} positions"
        ))
    } else {
        RiskFactor::new(RiskLevel::Low, 0.2).with_message("Low correlation risk")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::{CorrelationTable, NoCorrelationData};
    use rust_decimal::Decimal;

    fn diversified_portfolio(count: usize) -> PortfolioSnapshot {
        let mut portfolio = PortfolioSnapshot::new(Decimal::new(10_000, 0));
        for i in 0..count {
            portfolio = portfolio.with_position(format!("SYM{i}"), Decimal::new(1_000, 0));
        }
        portfolio
    }

    #[test]
    fn test_drawdown_over_limit() {
        let portfolio = diversified_portfolio(4).with_drawdown(0.20);
        let factors = evaluate(
            &RiskConfig::default(),
            &portfolio,
            "BTCUSDT",
            &NoCorrelationData,
        )
        .unwrap();
        let drawdown = factors.drawdown.unwrap();
        assert_eq!(drawdown.level, RiskLevel::VeryHigh);
        assert!((drawdown.score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_drawdown_under_limit_absent() {
        let portfolio = diversified_portfolio(4).with_drawdown(0.10);
        let factors = evaluate(
            &RiskConfig::default(),
            &portfolio,
            "BTCUSDT",
            &NoCorrelationData,
        )
        .unwrap();
        assert!(factors.drawdown.is_none());
    }

    #[test]
    fn test_correlation_insufficient_positions() {
        let portfolio = diversified_portfolio(1);
        let factors = evaluate(
            &RiskConfig::default(),
            &portfolio,
            "BTCUSDT",
            &NoCorrelationData,
        )
        .unwrap();
        assert_eq!(factors.correlation.level, RiskLevel::Low);
    }

    #[test]
    fn test_correlation_no_data_degrades_gracefully() {
        let portfolio = diversified_portfolio(5);
        let factors = evaluate(
            &RiskConfig::default(),
            &portfolio,
            "BTCUSDT",
            &NoCorrelationData,
        )
        .unwrap();
        assert_eq!(factors.correlation.level, RiskLevel::Low);
        assert!(factors
            .correlation
            .message
            .as_deref()
            .unwrap()
            .contains("No correlation data"));
    }

    #[test]
    fn test_correlation_mostly_high() {
        let portfolio = PortfolioSnapshot::new(Decimal::new(10_000, 0))
            .with_position("ETHUSDT", Decimal::new(2_000, 0))
            .with_position("SOLUSDT", Decimal::new(2_000, 0))
            .with_position("AVAXUSDT", Decimal::new(2_000, 0));
        let table = CorrelationTable::new()
            .with_pair("BTCUSDT", "ETHUSDT", 0.9)
            .with_pair("BTCUSDT", "SOLUSDT", 0.85)
            .with_pair("BTCUSDT", "AVAXUSDT", 0.2);
        let factors = evaluate(&RiskConfig::default(), &portfolio, "BTCUSDT", &table).unwrap();
        // 2 of 3 known pairs exceed 0.7.
        assert_eq!(factors.correlation.level, RiskLevel::High);
        assert!((factors.correlation.score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_diversification_low_flagged() {
        let portfolio = diversified_portfolio(2);
        let factors = evaluate(
            &RiskConfig::default(),
            &portfolio,
            "BTCUSDT",
            &NoCorrelationData,
        )
        .unwrap();
        assert_eq!(factors.diversification.unwrap().level, RiskLevel::High);
    }

    #[test]
    fn test_diversification_adequate_absent() {
        let portfolio = diversified_portfolio(5);
        let factors = evaluate(
            &RiskConfig::default(),
            &portfolio,
            "BTCUSDT",
            &NoCorrelationData,
        )
        .unwrap();
        assert!(factors.diversification.is_none());
    }
}
