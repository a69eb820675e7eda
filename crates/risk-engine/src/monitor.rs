//! Continuous portfolio monitoring.
//!
//! Not tied to any single trade: each pass scans a portfolio snapshot
//! for drawdown, concentration, and diversification problems and emits
//! alerts and recommendations alongside the computed metrics.

use chrono::Utc;
use risk_core::types::{
    AlertSeverity, PortfolioMetrics, PortfolioRiskReport, PortfolioSnapshot, Recommendation,
    RecommendationAction, RiskAlert, RiskAlertKind,
};
use risk_core::RiskConfig;
use tracing::warn;

/// Run one monitoring pass over a portfolio snapshot.
pub fn run(config: &RiskConfig, portfolio: &PortfolioSnapshot) -> PortfolioRiskReport {
    let mut risk_alerts = Vec::new();
    let mut recommendations = Vec::new();

    let drawdown_alert_level = config.max_drawdown * config.drawdown_alert_ratio;
    if portfolio.current_drawdown > drawdown_alert_level {
        warn!(
            drawdown = portfolio.current_drawdown,
            limit = config.max_drawdown,
            "Portfolio drawdown approaching limit"
        );
        risk_alerts.push(RiskAlert {
            kind: RiskAlertKind::DrawdownWarning,
            message: format!(
                "Drawdown approaching limit: {:.1}%",
                portfolio.current_drawdown * 100.0
            ),
            severity: AlertSeverity::High,
        });
    }

    let concentration = portfolio.concentration();
    if concentration > config.concentration_alert_threshold {
        risk_alerts.push(RiskAlert {
            kind: RiskAlertKind::ConcentrationWarning,
            message: format!(
                "High portfolio concentration: {:.1}%",
                concentration * 100.0
            ),
            severity: AlertSeverity::Medium,
        });
    }

    let diversification = portfolio.diversification_score(config.diversification_target);
    if diversification < config.diversification_alert_threshold {
        recommendations.push(Recommendation {
            action: RecommendationAction::Diversify,
            message: "Consider diversifying portfolio".to_string(),
            priority: AlertSeverity::Medium,
        });
    }

    PortfolioRiskReport {
        timestamp: Utc::now(),
        portfolio_metrics: PortfolioMetrics {
            current_drawdown: portfolio.current_drawdown,
            concentration_index: concentration,
            diversification_score: diversification,
            total_positions: portfolio.positions.len(),
            portfolio_value: portfolio.total_value,
        },
        risk_alerts,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_drawdown_warning_near_limit() {
        // 0.13 > 0.8 x 0.15 = 0.12
        let portfolio = PortfolioSnapshot::new(Decimal::new(10_000, 0)).with_drawdown(0.13);
        let report = run(&RiskConfig::default(), &portfolio);

        let drawdown_alerts: Vec<_> = report
            .risk_alerts
            .iter()
            .filter(|a| a.kind == RiskAlertKind::DrawdownWarning)
            .collect();
        assert_eq!(drawdown_alerts.len(), 1);
        assert_eq!(drawdown_alerts[0].severity, AlertSeverity::High);
    }

    #[test]
    fn test_no_drawdown_warning_below_alert_level() {
        let portfolio = PortfolioSnapshot::new(Decimal::new(10_000, 0)).with_drawdown(0.10);
        let report = run(&RiskConfig::default(), &portfolio);
        assert!(report
            .risk_alerts
            .iter()
            .all(|a| a.kind != RiskAlertKind::DrawdownWarning));
    }

    #[test]
    fn test_concentration_warning() {
        // Single position: HHI 1.0 > 0.6.
        let portfolio = PortfolioSnapshot::new(Decimal::new(10_000, 0))
            .with_position("BTCUSDT", Decimal::new(10_000, 0));
        let report = run(&RiskConfig::default(), &portfolio);
        assert!(report
            .risk_alerts
            .iter()
            .any(|a| a.kind == RiskAlertKind::ConcentrationWarning
                && a.severity == AlertSeverity::Medium));
    }

    #[test]
    fn test_diversify_recommendation_for_sparse_portfolio() {
        let portfolio = PortfolioSnapshot::new(Decimal::new(10_000, 0))
            .with_position("BTCUSDT", Decimal::new(5_000, 0));
        let report = run(&RiskConfig::default(), &portfolio);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.action == RecommendationAction::Diversify));
    }

    #[test]
    fn test_metrics_always_present() {
        let portfolio = PortfolioSnapshot::new(Decimal::new(25_000, 0))
            .with_drawdown(0.05)
            .with_position("BTCUSDT", Decimal::new(5_000, 0))
            .with_position("ETHUSDT", Decimal::new(5_000, 0));
        let report = run(&RiskConfig::default(), &portfolio);

        let metrics = &report.portfolio_metrics;
        assert_eq!(metrics.total_positions, 2);
        assert_eq!(metrics.portfolio_value, Decimal::new(25_000, 0));
        assert!((metrics.current_drawdown - 0.05).abs() < 1e-9);
        assert!((metrics.diversification_score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_healthy_portfolio_emits_nothing() {
        let mut portfolio = PortfolioSnapshot::new(Decimal::new(10_000, 0)).with_drawdown(0.02);
        for i in 0..5 {
            portfolio = portfolio.with_position(format!("SYM{i}"), Decimal::new(2_000, 0));
        }
        let report = run(&RiskConfig::default(), &portfolio);
        assert!(report.risk_alerts.is_empty());
        assert!(report.recommendations.is_empty());
    }
}
