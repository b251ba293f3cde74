use time::OffsetDateTime;

/// 24/7 market convention, no trading-calendar gaps.
pub const MINUTES_IN_YEAR: f64 = 525_600.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "long" => Some(Self::Long),
            "short" => Some(Self::Short),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Short => "short",
        }
    }

    /// Sign applied to price differences so adverse movement is negative
    /// regardless of side.
    pub fn direction(self) -> f64 {
        match self {
            Self::Long => 1.0,
            Self::Short => -1.0,
        }
    }
}

/// Immutable position parameters for one simulation run. The engine assumes
/// these were validated at intake and does not re-validate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionParams {
    pub entry_price: f64,
    pub liquidation_price: f64,
    pub position_size: f64,
    pub collateral: f64,
    /// Percent, typically negative. Travel at or below this triggers a hedge.
    pub rebalance_threshold: f64,
    /// Fraction of notional charged per hedge.
    pub hedging_cost_pct: f64,
    pub side: PositionSide,
}

impl Default for PositionParams {
    fn default() -> Self {
        Self {
            entry_price: 10_000.0,
            liquidation_price: 8_000.0,
            position_size: 1.0,
            collateral: 1_000.0,
            rebalance_threshold: -25.0,
            hedging_cost_pct: 0.001,
            side: PositionSide::Long,
        }
    }
}

/// Per-run settings. `start_time` is caller-supplied so fixed-seed runs
/// produce byte-identical logs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSettings {
    pub duration_minutes: f64,
    pub step_minutes: f64,
    pub drift: f64,
    pub volatility: f64,
    pub seed: u64,
    pub start_time: OffsetDateTime,
}
