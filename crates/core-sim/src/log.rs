use serde::{Deserialize, Serialize};

use crate::rebalance::HedgeFill;

/// Action taken on a step. Hedge detail exists only under the rebalance tag,
/// never as loose optional fields on the record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "fill")]
pub enum StepAction {
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "REBALANCE")]
    Rebalance(HedgeFill),
}

impl StepAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Rebalance(_) => "REBALANCE",
        }
    }

    pub fn is_rebalance(&self) -> bool {
        matches!(self, Self::Rebalance(_))
    }

    pub fn fill(&self) -> Option<HedgeFill> {
        match self {
            Self::None => None,
            Self::Rebalance(fill) => Some(*fill),
        }
    }
}

/// One row of the append-only step log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// 1-based step index.
    pub step: u64,
    /// RFC 3339, derived from the run start time plus the step offset.
    pub timestamp: String,
    pub price: f64,
    pub travel_percent: f64,
    pub action: StepAction,
    pub unrealized_pnl: f64,
    /// Running realized profit after this step's action.
    pub cumulative_profit: f64,
}

/// Result bundle for one completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub step_log: Vec<StepRecord>,
    pub final_price: f64,
    pub final_unrealized_pnl: f64,
    pub cumulative_profit: f64,
    pub total_profit: f64,
    pub rebalance_count: u64,
    pub total_hedging_cost: f64,
    /// `None` when collateral is zero; leverage is undefined, not an error.
    pub leverage: Option<f64>,
    pub collateral: f64,
    pub position_size: f64,
}
