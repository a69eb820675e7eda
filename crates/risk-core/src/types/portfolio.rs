//! Portfolio snapshot and concentration metrics.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Value of a single open position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub value: Decimal,
}

impl Holding {
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }
}

/// Read-only snapshot of portfolio state at assessment time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Total portfolio value.
    pub total_value: Decimal,
    /// Fractional decline from the portfolio's peak value, in [0, 1].
    pub current_drawdown: f64,
    /// Open positions keyed by symbol.
    pub positions: HashMap<String, Holding>,
}

impl PortfolioSnapshot {
    pub fn new(total_value: Decimal) -> Self {
        Self {
            total_value,
            current_drawdown: 0.0,
            positions: HashMap::new(),
        }
    }

    pub fn with_drawdown(mut self, current_drawdown: f64) -> Self {
        self.current_drawdown = current_drawdown;
        self
    }

    pub fn with_position(mut self, symbol: impl Into<String>, value: Decimal) -> Self {
        self.positions.insert(symbol.into(), Holding::new(value));
        self
    }

    /// Total value guarded against zero, so ratio math never divides
    /// by zero on an empty or malformed snapshot.
    pub fn safe_total_value(&self) -> Decimal {
        if self.total_value > Decimal::ZERO {
            self.total_value
        } else {
            Decimal::ONE
        }
    }

    /// Herfindahl-Hirschman concentration index over position value
    /// shares. 0 = no positions or perfectly diversified, 1 = a single
    /// position holds the whole portfolio.
    pub fn concentration(&self) -> f64 {
        if self.positions.is_empty() || self.total_value <= Decimal::ZERO {
            return 0.0;
        }
        let total = self
            .total_value
            .to_f64()
            .filter(|t| *t > 0.0)
            .unwrap_or(1.0);
        self.positions
            .values()
            .map(|holding| {
                let share = holding.value.to_f64().unwrap_or(0.0) / total;
                share * share
            })
            .sum()
    }

    /// Diversification score in [0, 1]: position count relative to the
    /// target count, saturating at 1.
    pub fn diversification_score(&self, target_positions: usize) -> f64 {
        if target_positions == 0 {
            return 0.0;
        }
        (self.positions.len() as f64 / target_positions as f64).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portfolio_with_positions(values: &[i64]) -> PortfolioSnapshot {
        let total: i64 = values.iter().sum();
        let mut portfolio = PortfolioSnapshot::new(Decimal::new(total, 0));
        for (i, value) in values.iter().enumerate() {
            portfolio = portfolio.with_position(format!("SYM{i}"), Decimal::new(*value, 0));
        }
        portfolio
    }

    #[test]
    fn test_concentration_single_position() {
        let portfolio = portfolio_with_positions(&[1000]);
        assert!((portfolio.concentration() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_concentration_even_split() {
        let portfolio = portfolio_with_positions(&[250, 250, 250, 250]);
        assert!((portfolio.concentration() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_concentration_empty_portfolio() {
        let portfolio = PortfolioSnapshot::new(Decimal::new(1000, 0));
        assert_eq!(portfolio.concentration(), 0.0);
    }

    #[test]
    fn test_diversification_score_saturates() {
        let portfolio = portfolio_with_positions(&[100; 12]);
        assert_eq!(portfolio.diversification_score(10), 1.0);

        let sparse = portfolio_with_positions(&[100, 100, 100]);
        assert!((sparse.diversification_score(10) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_safe_total_value_guards_zero() {
        let portfolio = PortfolioSnapshot::new(Decimal::ZERO);
        assert_eq!(portfolio.safe_total_value(), Decimal::ONE);
    }
}
