//! Market risk: volatility band, volume liquidity, trend strength, and
//! regime classification.

use crate::regime::RegimeCache;
use risk_core::types::{MarketRegime, MarketRiskFactors, MarketSnapshot, RegimeFactor, RiskFactor, RiskLevel};
use risk_core::{Result, RiskConfig};
use tracing::debug;

/// Evaluate market risk for a symbol. The classified regime is recorded
/// in `cache` as an observational side effect.
pub fn evaluate(
    config: &RiskConfig,
    symbol: &str,
    market: &MarketSnapshot,
    cache: &RegimeCache,
) -> Result<MarketRiskFactors> {
    let volatility = market.volatility.filter(|v| *v > 0.0).map(|volatility| {
        if volatility > config.volatility_threshold_high {
            RiskFactor::new(RiskLevel::High, 0.8)
        } else if volatility < config.volatility_threshold_low {
            RiskFactor::new(RiskLevel::Low, 0.2)
        } else {
            RiskFactor::new(RiskLevel::Medium, 0.5)
        }
    });

    let liquidity = match (market.volume, market.average_volume) {
        (Some(volume), Some(average)) if average > 0.0 => {
            let ratio = volume / average;
            Some(if ratio < 0.5 {
                RiskFactor::new(RiskLevel::High, 0.7)
            } else if ratio > 2.0 {
                RiskFactor::new(RiskLevel::Low, 0.3)
            } else {
                RiskFactor::new(RiskLevel::Medium, 0.5)
            })
        }
        _ => None,
    };

    let trend = market.trend_strength.map(|strength| {
        if strength > 0.7 {
            RiskFactor::new(RiskLevel::Low, 0.3)
        } else if strength < 0.3 {
            RiskFactor::new(RiskLevel::High, 0.7)
        } else {
            RiskFactor::new(RiskLevel::Medium, 0.5)
        }
    });

    let regime = MarketRegime::classify(
        market.volatility_or(config.default_volatility),
        market.trend_strength_or_neutral(),
    );
    cache.record(symbol, regime);
    debug!(symbol, ?regime, "Classified market regime");

    Ok(MarketRiskFactors {
        volatility,
        liquidity,
        trend,
        market_regime: RegimeFactor::from_regime(regime),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate_snapshot(market: &MarketSnapshot) -> MarketRiskFactors {
        let cache = RegimeCache::new();
        evaluate(&RiskConfig::default(), "BTCUSDT", market, &cache).unwrap()
    }

    #[test]
    fn test_volatility_bands() {
        let high = evaluate_snapshot(&MarketSnapshot::new().with_volatility(0.06));
        assert_eq!(high.volatility.unwrap().level, RiskLevel::High);

        let low = evaluate_snapshot(&MarketSnapshot::new().with_volatility(0.005));
        assert_eq!(low.volatility.unwrap().level, RiskLevel::Low);

        let medium = evaluate_snapshot(&MarketSnapshot::new().with_volatility(0.02));
        assert_eq!(medium.volatility.unwrap().level, RiskLevel::Medium);
    }

    #[test]
    fn test_volume_ratio_bands() {
        let thin = evaluate_snapshot(&MarketSnapshot::new().with_volume(400.0, 1000.0));
        let factor = thin.liquidity.unwrap();
        assert_eq!(factor.level, RiskLevel::High);
        assert!((factor.score - 0.7).abs() < 1e-9);

        let surging = evaluate_snapshot(&MarketSnapshot::new().with_volume(2500.0, 1000.0));
        assert_eq!(surging.liquidity.unwrap().level, RiskLevel::Low);
    }

    #[test]
    fn test_trend_strength_bands() {
        let strong = evaluate_snapshot(&MarketSnapshot::new().with_trend_strength(0.8));
        assert_eq!(strong.trend.unwrap().level, RiskLevel::Low);

        let weak = evaluate_snapshot(&MarketSnapshot::new().with_trend_strength(0.2));
        assert_eq!(weak.trend.unwrap().level, RiskLevel::High);
    }

    #[test]
    fn test_missing_fields_skip_subfactors() {
        let factors = evaluate_snapshot(&MarketSnapshot::new());
        assert!(factors.volatility.is_none());
        assert!(factors.liquidity.is_none());
        assert!(factors.trend.is_none());
        // Regime is always classified, from defaults when data is missing.
        assert_eq!(factors.market_regime.regime, MarketRegime::Normal);
    }

    #[test]
    fn test_zero_average_volume_skips_liquidity() {
        let factors = evaluate_snapshot(&MarketSnapshot::new().with_volume(1000.0, 0.0));
        assert!(factors.liquidity.is_none());
    }

    #[test]
    fn test_regime_recorded_in_cache() {
        let cache = RegimeCache::new();
        let market = MarketSnapshot::new()
            .with_volatility(0.07)
            .with_trend_strength(0.5);
        evaluate(&RiskConfig::default(), "ETHUSDT", &market, &cache).unwrap();

        let entry = cache.snapshot("ETHUSDT").unwrap();
        assert_eq!(entry.regime, MarketRegime::HighVolBreakout);
    }
}
