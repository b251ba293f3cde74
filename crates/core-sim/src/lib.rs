mod config;
mod generators;
mod log;
mod rebalance;
mod run;
mod state;
mod travel;

pub use config::{PositionParams, PositionSide, RunSettings, MINUTES_IN_YEAR};
pub use generators::PricePathGenerator;
pub use log::{RunResult, StepAction, StepRecord};
pub use rebalance::{execute_hedge, should_rebalance, HedgeFill};
pub use run::Simulator;
pub use state::SimState;
pub use travel::travel_percent;
