/// Mutable cross-step simulator state. `effective_reference_price` only
/// changes inside a hedge execution, and always to the triggering price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimState {
    pub effective_reference_price: f64,
    pub cumulative_realized_profit: f64,
    pub total_hedging_cost: f64,
    pub rebalance_count: u64,
}

impl SimState {
    pub fn new(entry_price: f64) -> Self {
        Self {
            effective_reference_price: entry_price,
            cumulative_realized_profit: 0.0,
            total_hedging_cost: 0.0,
            rebalance_count: 0,
        }
    }
}
