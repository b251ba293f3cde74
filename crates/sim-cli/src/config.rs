use std::{env, fmt};

use core_sim::{PositionParams, PositionSide};

const DEFAULT_CSV_OUTPUT_PATH: &str = "artifacts/step_log.csv";

const ENTRY_PRICE_KEY: &str = "HEDGE_SIM_ENTRY_PRICE";
const LIQUIDATION_PRICE_KEY: &str = "HEDGE_SIM_LIQUIDATION_PRICE";
const POSITION_SIZE_KEY: &str = "HEDGE_SIM_POSITION_SIZE";
const COLLATERAL_KEY: &str = "HEDGE_SIM_COLLATERAL";
const REBALANCE_THRESHOLD_KEY: &str = "HEDGE_SIM_REBALANCE_THRESHOLD";
const HEDGING_COST_PCT_KEY: &str = "HEDGE_SIM_HEDGING_COST_PCT";
const SIDE_KEY: &str = "HEDGE_SIM_SIDE";
const DURATION_MINUTES_KEY: &str = "HEDGE_SIM_DURATION_MINUTES";
const STEP_MINUTES_KEY: &str = "HEDGE_SIM_STEP_MINUTES";
const DRIFT_KEY: &str = "HEDGE_SIM_DRIFT";
const VOLATILITY_KEY: &str = "HEDGE_SIM_VOLATILITY";
const SEED_KEY: &str = "HEDGE_SIM_SEED";
const CSV_OUTPUT_KEY: &str = "HEDGE_SIM_CSV_OUTPUT";

/// Validated simulation parameters. The engine assumes validated inputs, so
/// every rejection happens here, before a simulator is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub params: PositionParams,
    pub duration_minutes: f64,
    pub step_minutes: f64,
    pub drift: f64,
    pub volatility: f64,
    pub seed: Option<u64>,
    pub csv_output_path: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    InvalidNumber { key: &'static str },
    OutOfRange { key: &'static str, requirement: &'static str },
    InvalidSide,
    InvalidSeed,
    InvalidCsvOutputPath,
    NonUnicode { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber { key } => write!(f, "{key} is not a valid number"),
            Self::OutOfRange { key, requirement } => write!(f, "{key} must be {requirement}"),
            Self::InvalidSide => write!(f, "{SIDE_KEY} must be one of: long, short"),
            Self::InvalidSeed => write!(f, "{SEED_KEY} must be an unsigned 64-bit integer"),
            Self::InvalidCsvOutputPath => {
                write!(f, "{CSV_OUTPUT_KEY} must not be empty or whitespace")
            }
            Self::NonUnicode { key } => write!(f, "{key} contains non-unicode data"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl CliConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let entry_price = parse_f64_env(
            ENTRY_PRICE_KEY,
            10_000.0,
            |value| value > 0.0,
            "a finite number greater than zero",
        )?;
        let liquidation_price = parse_f64_env(
            LIQUIDATION_PRICE_KEY,
            8_000.0,
            |value| value >= 0.0,
            "a finite non-negative number",
        )?;
        let position_size = parse_f64_env(
            POSITION_SIZE_KEY,
            1.0,
            |value| value > 0.0,
            "a finite number greater than zero",
        )?;
        let collateral = parse_f64_env(
            COLLATERAL_KEY,
            1_000.0,
            |value| value >= 0.0,
            "a finite non-negative number",
        )?;
        let rebalance_threshold = parse_f64_env(
            REBALANCE_THRESHOLD_KEY,
            -25.0,
            |_| true,
            "a finite percentage",
        )?;
        let hedging_cost_pct = parse_f64_env(
            HEDGING_COST_PCT_KEY,
            0.001,
            |value| value >= 0.0,
            "a finite non-negative fraction",
        )?;

        let side = match env::var(SIDE_KEY) {
            Ok(value) => PositionSide::parse(value.as_str()).ok_or(ConfigError::InvalidSide)?,
            Err(env::VarError::NotPresent) => PositionSide::Long,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NonUnicode { key: SIDE_KEY });
            }
        };

        let duration_minutes = parse_f64_env(
            DURATION_MINUTES_KEY,
            60.0,
            |value| value >= 0.0,
            "a finite non-negative number of minutes",
        )?;
        let step_minutes = parse_f64_env(
            STEP_MINUTES_KEY,
            1.0,
            |value| value > 0.0,
            "a finite number of minutes greater than zero",
        )?;
        let drift = parse_f64_env(DRIFT_KEY, 0.05, |_| true, "a finite annualized rate")?;
        let volatility = parse_f64_env(
            VOLATILITY_KEY,
            0.8,
            |value| value >= 0.0,
            "a finite non-negative annualized rate",
        )?;

        let seed = match env::var(SEED_KEY) {
            Ok(value) => Some(
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed)?,
            ),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NonUnicode { key: SEED_KEY });
            }
        };

        let csv_output_path = match env::var(CSV_OUTPUT_KEY) {
            Ok(value) => {
                if value.trim().is_empty() {
                    return Err(ConfigError::InvalidCsvOutputPath);
                }
                value
            }
            Err(env::VarError::NotPresent) => DEFAULT_CSV_OUTPUT_PATH.to_owned(),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NonUnicode {
                    key: CSV_OUTPUT_KEY,
                });
            }
        };

        Ok(Self {
            params: PositionParams {
                entry_price,
                liquidation_price,
                position_size,
                collateral,
                rebalance_threshold,
                hedging_cost_pct,
                side,
            },
            duration_minutes,
            step_minutes,
            drift,
            volatility,
            seed,
            csv_output_path,
        })
    }
}

fn parse_f64_env(
    key: &'static str,
    default_value: f64,
    in_range: fn(f64) -> bool,
    requirement: &'static str,
) -> Result<f64, ConfigError> {
    let parsed = match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidNumber { key })?,
        Err(env::VarError::NotPresent) => default_value,
        Err(env::VarError::NotUnicode(_)) => return Err(ConfigError::NonUnicode { key }),
    };

    if !parsed.is_finite() || !in_range(parsed) {
        return Err(ConfigError::OutOfRange { key, requirement });
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use std::{env, sync::Mutex};

    use core_sim::{PositionParams, PositionSide};

    use super::{CliConfig, ConfigError};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ALL_KEYS: [&str; 13] = [
        "HEDGE_SIM_ENTRY_PRICE",
        "HEDGE_SIM_LIQUIDATION_PRICE",
        "HEDGE_SIM_POSITION_SIZE",
        "HEDGE_SIM_COLLATERAL",
        "HEDGE_SIM_REBALANCE_THRESHOLD",
        "HEDGE_SIM_HEDGING_COST_PCT",
        "HEDGE_SIM_SIDE",
        "HEDGE_SIM_DURATION_MINUTES",
        "HEDGE_SIM_STEP_MINUTES",
        "HEDGE_SIM_DRIFT",
        "HEDGE_SIM_VOLATILITY",
        "HEDGE_SIM_SEED",
        "HEDGE_SIM_CSV_OUTPUT",
    ];

    struct EnvVarGuard {
        key: &'static str,
        previous: Option<std::ffi::OsString>,
    }

    impl EnvVarGuard {
        fn set(key: &'static str, value: &str) -> Self {
            let previous = env::var_os(key);
            env::set_var(key, value);
            Self { key, previous }
        }

        fn unset(key: &'static str) -> Self {
            let previous = env::var_os(key);
            env::remove_var(key);
            Self { key, previous }
        }

        #[cfg(unix)]
        fn set_os(key: &'static str, value: std::ffi::OsString) -> Self {
            let previous = env::var_os(key);
            env::set_var(key, value);
            Self { key, previous }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            match self.previous.take() {
                Some(value) => env::set_var(self.key, value),
                None => env::remove_var(self.key),
            }
        }
    }

    fn reset_env_baseline() -> Vec<EnvVarGuard> {
        ALL_KEYS.iter().map(|key| EnvVarGuard::unset(key)).collect()
    }

    #[test]
    fn defaults_match_the_reference_scenario_when_env_is_unset() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_env_baseline();

        let config = CliConfig::from_env().unwrap();

        assert_eq!(config.params, PositionParams::default());
        assert_eq!(config.duration_minutes, 60.0);
        assert_eq!(config.step_minutes, 1.0);
        assert_eq!(config.drift, 0.05);
        assert_eq!(config.volatility, 0.8);
        assert_eq!(config.seed, None);
        assert_eq!(config.csv_output_path, "artifacts/step_log.csv");
    }

    #[test]
    fn applies_overrides_from_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_env_baseline();
        let _entry = EnvVarGuard::set("HEDGE_SIM_ENTRY_PRICE", "20000");
        let _liq = EnvVarGuard::set("HEDGE_SIM_LIQUIDATION_PRICE", "24000");
        let _side = EnvVarGuard::set("HEDGE_SIM_SIDE", "short");
        let _seed = EnvVarGuard::set("HEDGE_SIM_SEED", "42");
        let _path = EnvVarGuard::set("HEDGE_SIM_CSV_OUTPUT", "artifacts/custom.csv");

        let config = CliConfig::from_env().unwrap();

        assert_eq!(config.params.entry_price, 20_000.0);
        assert_eq!(config.params.liquidation_price, 24_000.0);
        assert_eq!(config.params.side, PositionSide::Short);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.csv_output_path, "artifacts/custom.csv");
    }

    #[test]
    fn rejects_non_numeric_values_before_engine_construction() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_env_baseline();
        let _guard = EnvVarGuard::set("HEDGE_SIM_ENTRY_PRICE", "ten thousand");

        let err = CliConfig::from_env().unwrap_err();

        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                key: "HEDGE_SIM_ENTRY_PRICE"
            }
        );
    }

    #[test]
    fn rejects_non_finite_values() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_env_baseline();
        let _guard = EnvVarGuard::set("HEDGE_SIM_DRIFT", "inf");

        let err = CliConfig::from_env().unwrap_err();

        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                key: "HEDGE_SIM_DRIFT",
                ..
            }
        ));
    }

    #[test]
    fn rejects_zero_step_duration() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_env_baseline();
        let _guard = EnvVarGuard::set("HEDGE_SIM_STEP_MINUTES", "0");

        let err = CliConfig::from_env().unwrap_err();

        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                key: "HEDGE_SIM_STEP_MINUTES",
                ..
            }
        ));
    }

    #[test]
    fn rejects_negative_volatility() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_env_baseline();
        let _guard = EnvVarGuard::set("HEDGE_SIM_VOLATILITY", "-0.5");

        let err = CliConfig::from_env().unwrap_err();

        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                key: "HEDGE_SIM_VOLATILITY",
                ..
            }
        ));
    }

    #[test]
    fn rejects_unknown_position_side() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_env_baseline();
        let _guard = EnvVarGuard::set("HEDGE_SIM_SIDE", "sideways");

        let err = CliConfig::from_env().unwrap_err();

        assert_eq!(err, ConfigError::InvalidSide);
    }

    #[test]
    fn rejects_invalid_seed() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_env_baseline();
        let _guard = EnvVarGuard::set("HEDGE_SIM_SEED", "-1");

        let err = CliConfig::from_env().unwrap_err();

        assert_eq!(err, ConfigError::InvalidSeed);
    }

    #[test]
    fn rejects_whitespace_csv_output_path() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_env_baseline();
        let _guard = EnvVarGuard::set("HEDGE_SIM_CSV_OUTPUT", "   ");

        let err = CliConfig::from_env().unwrap_err();

        assert_eq!(err, ConfigError::InvalidCsvOutputPath);
    }

    #[cfg(unix)]
    #[test]
    fn rejects_non_unicode_numeric_env_var() {
        use std::os::unix::ffi::OsStringExt;

        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_env_baseline();
        let _guard = EnvVarGuard::set_os(
            "HEDGE_SIM_COLLATERAL",
            std::ffi::OsString::from_vec(vec![0x66, 0x6f, 0x80]),
        );

        let err = CliConfig::from_env().unwrap_err();

        assert_eq!(
            err,
            ConfigError::NonUnicode {
                key: "HEDGE_SIM_COLLATERAL"
            }
        );
    }
}
