//! Quantity adjustment advice for gated trades.

use risk_core::types::{AdjustmentAction, PortfolioSnapshot, PositionAdjustment, TradeProposal};
use risk_core::{Error, Result, RiskConfig};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// Safety margin applied below the hard position-size cap.
const CAP_MARGIN: Decimal = Decimal::from_parts(8, 0, 0, false, 1); // 0.8

/// Suggest a quantity that would satisfy the position-size limit.
///
/// Invoked only when the gate failed. If the proposed quantity already
/// fits the cap, the blocking risk lies elsewhere and the advice is to
/// proceed at the proposed size.
pub fn suggest(
    config: &RiskConfig,
    proposal: &TradeProposal,
    portfolio: &PortfolioSnapshot,
) -> Result<PositionAdjustment> {
    let max_position_size = Decimal::from_f64(config.max_position_size)
        .ok_or_else(|| Error::Numeric("max position size".to_string()))?;
    let max_quantity = portfolio.safe_total_value() * max_position_size / proposal.price;

    if proposal.quantity > max_quantity {
        let recommended = (max_quantity * CAP_MARGIN).round_dp(6);
        let reduction = ((proposal.quantity - recommended) / proposal.quantity
            * Decimal::ONE_HUNDRED)
            .to_f64()
            .ok_or_else(|| Error::Numeric("reduction percent".to_string()))?;
        Ok(PositionAdjustment {
            action: AdjustmentAction::Reduce,
            current_quantity: proposal.quantity,
            recommended_quantity: recommended,
            reduction_percent: Some((reduction * 10.0).round() / 10.0),
            reason: "Position size exceeds risk limits".to_string(),
        })
    } else {
        Ok(PositionAdjustment {
            action: AdjustmentAction::Proceed,
            current_quantity: proposal.quantity,
            recommended_quantity: proposal.quantity,
            reduction_percent: None,
            reason: "Position within acceptable limits".to_string(),
        })
    }
}

/// Advice of last resort when even the adjustment math fails: hold at
/// the proposed quantity and let the caller decide.
pub fn hold_in_place(proposal: &TradeProposal) -> PositionAdjustment {
    PositionAdjustment {
        action: AdjustmentAction::Hold,
        current_quantity: proposal.quantity,
        recommended_quantity: proposal.quantity,
        reduction_percent: None,
        reason: "Error in risk calculation".to_string(),
    }
}
