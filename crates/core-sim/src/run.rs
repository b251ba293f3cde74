use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

use crate::config::{PositionParams, RunSettings};
use crate::generators::PricePathGenerator;
use crate::log::{RunResult, StepAction, StepRecord};
use crate::rebalance::{execute_hedge, should_rebalance};
use crate::state::SimState;
use crate::travel::travel_percent;

/// One simulator instance drives exactly one logical run: `run` consumes it
/// and the result bundle is all that survives. Steps are strictly sequential
/// because each depends on the reference price left by the previous one.
#[derive(Debug, Clone)]
pub struct Simulator {
    params: PositionParams,
    state: SimState,
    step_log: Vec<StepRecord>,
}

impl Simulator {
    pub fn new(params: PositionParams) -> Self {
        Self {
            params,
            state: SimState::new(params.entry_price),
            step_log: Vec::new(),
        }
    }

    pub fn params(&self) -> &PositionParams {
        &self.params
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn step_log(&self) -> &[StepRecord] {
        &self.step_log
    }

    /// Applies one already-generated price: travel against the current
    /// reference, at most one hedge, unrealized PnL against the post-action
    /// reference, one appended log row. Exposed separately from price
    /// generation so crafted deterministic sequences can drive the policy.
    pub fn apply_price(&mut self, step: u64, timestamp: String, price: f64) -> &StepRecord {
        let travel = travel_percent(
            price,
            self.state.effective_reference_price,
            self.params.liquidation_price,
            self.params.side,
        );

        let action = if should_rebalance(travel, self.params.rebalance_threshold) {
            StepAction::Rebalance(execute_hedge(&self.params, &mut self.state, price))
        } else {
            StepAction::None
        };

        let unrealized_pnl = self.params.side.direction()
            * (price - self.state.effective_reference_price)
            * self.params.position_size;

        self.step_log.push(StepRecord {
            step,
            timestamp,
            price,
            travel_percent: travel,
            action,
            unrealized_pnl,
            cumulative_profit: self.state.cumulative_realized_profit,
        });

        self.step_log.last().expect("record was just appended")
    }

    /// Runs `floor(duration / step)` steps from the entry price and returns
    /// the result bundle. A step never fails: degenerate numeric cases
    /// resolve to defined values inside the step.
    pub fn run(mut self, settings: &RunSettings) -> RunResult {
        let num_steps = (settings.duration_minutes / settings.step_minutes).floor() as u64;
        let mut generator = PricePathGenerator::new(
            settings.seed,
            settings.drift,
            settings.volatility,
            settings.step_minutes,
        );

        let mut current_price = self.params.entry_price;
        for step in 1..=num_steps {
            let next_price = generator.next_price(current_price);
            let timestamp = step_timestamp(settings.start_time, settings.step_minutes, step);
            self.apply_price(step, timestamp, next_price);
            current_price = next_price;
        }

        self.finish(current_price)
    }

    /// Folds the final price into the summary fields and releases the log.
    pub fn finish(self, final_price: f64) -> RunResult {
        let params = self.params;
        let state = self.state;

        let final_unrealized_pnl = params.side.direction()
            * (final_price - state.effective_reference_price)
            * params.position_size;
        let total_profit = state.cumulative_realized_profit + final_unrealized_pnl;
        let leverage = if params.collateral == 0.0 {
            None
        } else {
            Some(params.position_size * final_price / params.collateral)
        };

        RunResult {
            step_log: self.step_log,
            final_price,
            final_unrealized_pnl,
            cumulative_profit: state.cumulative_realized_profit,
            total_profit,
            rebalance_count: state.rebalance_count,
            total_hedging_cost: state.total_hedging_cost,
            leverage,
            collateral: params.collateral,
            position_size: params.position_size,
        }
    }
}

fn step_timestamp(start_time: OffsetDateTime, step_minutes: f64, step: u64) -> String {
    let offset_minutes = step_minutes * (step - 1) as f64;
    let stamped = start_time + Duration::seconds_f64(offset_minutes * 60.0);
    stamped.format(&Rfc3339).unwrap_or_default()
}
