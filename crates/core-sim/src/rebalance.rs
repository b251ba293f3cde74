use serde::{Deserialize, Serialize};

use crate::config::PositionParams;
use crate::state::SimState;

/// Realized outcome of a single hedge leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HedgeFill {
    pub trade_profit: f64,
    pub hedging_cost: f64,
    pub net_profit: f64,
}

/// Inclusive trigger: travel at the threshold hedges, not just below it.
pub fn should_rebalance(travel_pct: f64, threshold: f64) -> bool {
    travel_pct <= threshold
}

/// Executes one hedge at `price`: realizes profit/loss against the current
/// reference, charges a cost scaled by notional exposure, and resets the
/// reference price to `price`. At most one hedge per step.
pub fn execute_hedge(params: &PositionParams, state: &mut SimState, price: f64) -> HedgeFill {
    let trade_profit =
        params.side.direction() * (price - state.effective_reference_price) * params.position_size;
    let hedging_cost = (price * params.position_size).abs() * params.hedging_cost_pct;
    let net_profit = trade_profit - hedging_cost;

    state.cumulative_realized_profit += net_profit;
    state.total_hedging_cost += hedging_cost;
    state.rebalance_count += 1;
    state.effective_reference_price = price;

    HedgeFill {
        trade_profit,
        hedging_cost,
        net_profit,
    }
}
