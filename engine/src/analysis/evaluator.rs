//! Piotroski criteria evaluation.
//!
//! Every criterion is a strict comparison on the current period, or between the
//! current and the prior period. No tolerance is applied.

use crate::error::Result;
use crate::models::{CriteriaResult, IndicatorHistory, IndicatorRecord};

/// Evaluates the nine criteria for one ticker.
pub fn evaluate(current: &IndicatorRecord, prior: &IndicatorRecord) -> CriteriaResult {
    CriteriaResult {
        roa_positive: current.roa > 0.0,
        fco_positive: current.fco > 0.0,
        fco_exceeds_net_income: current.fco > current.net_income,
        roa_increasing: current.roa > prior.roa,
        leverage_decreasing: current.leverage < prior.leverage,
        liquidity_increasing: current.liquidity > prior.liquidity,
        share_count_constant: current.share_count == prior.share_count,
        gross_margin_increasing: current.gross_margin > prior.gross_margin,
        asset_turnover_increasing: current.asset_turnover > prior.asset_turnover,
    }
}

/// Evaluates the two most recent periods of a fetched history.
pub fn evaluate_history(history: &IndicatorHistory) -> Result<CriteriaResult> {
    let (current, prior) = history.current_and_prior()?;
    Ok(evaluate(&current, &prior))
}
