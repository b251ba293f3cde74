mod config;

use std::error::Error;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use core_sim::{RunSettings, Simulator, StepRecord};
use runtime::export::StepLogCsvWriter;
use runtime::logging::{log_run_events, RunLogWriter, StderrRunLogWriter};
use time::OffsetDateTime;

fn main() -> Result<(), Box<dyn Error>> {
    let config = config::CliConfig::from_env()?;

    let settings = RunSettings {
        duration_minutes: config.duration_minutes,
        step_minutes: config.step_minutes,
        drift: config.drift,
        volatility: config.volatility,
        seed: config.seed.unwrap_or_else(seed_from_system_time),
        start_time: OffsetDateTime::now_utc(),
    };
    let result = Simulator::new(config.params).run(&settings);

    let mut run_log = StderrRunLogWriter;
    log_run_events(&result, &mut run_log);

    // Export is optional: a failed artifact write is reported but never
    // disturbs the already-computed result.
    if let Err(err) = write_csv_artifact(&config.csv_output_path, &result.step_log, &mut run_log) {
        eprintln!(
            "failed to write step log to {}: {err}",
            config.csv_output_path
        );
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn seed_from_system_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}

fn write_csv_artifact(
    path: &str,
    records: &[StepRecord],
    run_log: &mut dyn RunLogWriter,
) -> io::Result<()> {
    let csv_path = Path::new(path);

    if let Some(parent) = csv_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(csv_path)?;
    let mut writer = StepLogCsvWriter::new(file);
    writer.write_records_and_log(records, run_log)
}
