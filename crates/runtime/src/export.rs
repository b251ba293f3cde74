use std::io::{self, Write};

use core_sim::StepRecord;

use crate::logging::{RunLogEvent, RunLogEventKind, RunLogWriter};

/// Fixed column set. Hedge-detail columns are present in every row but
/// empty unless the row's action is REBALANCE; consumers must tolerate the
/// sparse columns.
pub const STEP_LOG_CSV_HEADER: &str = "step,timestamp,price,travel_percent,action,\
unrealized_pnl,cumulative_profit,trade_profit,hedging_cost,net_profit\n";

pub struct StepLogCsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> StepLogCsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_header(&mut self) -> io::Result<()> {
        self.writer.write_all(STEP_LOG_CSV_HEADER.as_bytes())
    }

    pub fn append_records(&mut self, records: &[StepRecord]) -> io::Result<()> {
        for record in records {
            let (trade_profit, hedging_cost, net_profit) = match record.action.fill() {
                Some(fill) => (
                    fill.trade_profit.to_string(),
                    fill.hedging_cost.to_string(),
                    fill.net_profit.to_string(),
                ),
                None => (String::new(), String::new(), String::new()),
            };

            writeln!(
                self.writer,
                "{},{},{},{},{},{},{},{},{},{}",
                record.step,
                record.timestamp,
                record.price,
                record.travel_percent,
                record.action.as_str(),
                record.unrealized_pnl,
                record.cumulative_profit,
                trade_profit,
                hedging_cost,
                net_profit,
            )?;
        }

        Ok(())
    }

    /// Writes the full artifact and confirms it in the run log. The artifact
    /// is flushed before the confirmation event is emitted, so a logged
    /// export always exists on the underlying writer.
    pub fn write_records_and_log(
        &mut self,
        records: &[StepRecord],
        run_log_writer: &mut dyn RunLogWriter,
    ) -> io::Result<()> {
        self.write_header()?;
        self.append_records(records)?;
        self.writer.flush()?;
        run_log_writer.write(RunLogEvent::new(
            records.len() as u64,
            RunLogEventKind::ExportArtifactWritten,
            None,
        ));
        Ok(())
    }
}
