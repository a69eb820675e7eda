//! Trade proposal types.

use crate::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a proposed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeAction {
    Buy,
    Sell,
    Hold,
    Reduce,
    Close,
}

impl TradeAction {
    /// Whether the stop-loss sits below the entry price.
    ///
    /// Only BUY protects downward; every other action exits an existing
    /// exposure and stops above the entry.
    pub fn stops_below_entry(self) -> bool {
        matches!(self, TradeAction::Buy)
    }
}

/// A proposed trade submitted for risk assessment.
///
/// Immutable input, created per assessment call and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeProposal {
    pub symbol: String,
    pub action: TradeAction,
    pub quantity: Decimal,
    pub price: Decimal,
}

impl TradeProposal {
    /// Create a validated trade proposal.
    pub fn new(
        symbol: impl Into<String>,
        action: TradeAction,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<Self> {
        let proposal = Self {
            symbol: symbol.into(),
            action,
            quantity,
            price,
        };
        proposal.validate()?;
        Ok(proposal)
    }

    /// Check the proposal invariants. Fields are public, so the engine
    /// re-checks before scoring and falls back on violation.
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(Error::InvalidProposal("symbol must not be empty".to_string()));
        }
        if self.quantity <= Decimal::ZERO {
            return Err(Error::InvalidProposal(format!(
                "quantity must be positive, got {}",
                self.quantity
            )));
        }
        if self.price <= Decimal::ZERO {
            return Err(Error::InvalidProposal(format!(
                "price must be positive, got {}",
                self.price
            )));
        }
        Ok(())
    }

    /// Notional value of the proposed trade.
    pub fn notional(&self) -> Decimal {
        self.quantity * self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_proposal() {
        let proposal = TradeProposal::new(
            "BTCUSDT",
            TradeAction::Buy,
            Decimal::new(2, 0),
            Decimal::new(100, 0),
        )
        .unwrap();
        assert_eq!(proposal.notional(), Decimal::new(200, 0));
    }

    #[test]
    fn test_rejects_non_positive_quantity() {
        let result = TradeProposal::new(
            "BTCUSDT",
            TradeAction::Buy,
            Decimal::ZERO,
            Decimal::new(100, 0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_empty_symbol() {
        let result = TradeProposal::new(
            "  ",
            TradeAction::Sell,
            Decimal::ONE,
            Decimal::new(100, 0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_action_wire_format() {
        assert_eq!(serde_json::to_string(&TradeAction::Buy).unwrap(), "\"BUY\"");
        assert_eq!(
            serde_json::to_string(&TradeAction::Reduce).unwrap(),
            "\"REDUCE\""
        );
    }
}
