use core_sim::RunResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunLogEventKind {
    RunStarted,
    RebalanceExecuted,
    RunCompleted,
    ExportArtifactWritten,
}

impl RunLogEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RunStarted => "run_started",
            Self::RebalanceExecuted => "rebalance_executed",
            Self::RunCompleted => "run_completed",
            Self::ExportArtifactWritten => "export_artifact_written",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunLogEvent {
    pub step: u64,
    pub kind: RunLogEventKind,
    pub net_profit: Option<f64>,
}

impl RunLogEvent {
    pub fn new(step: u64, kind: RunLogEventKind, net_profit: Option<f64>) -> Self {
        Self {
            step,
            kind,
            net_profit,
        }
    }
}

pub trait RunLogWriter {
    fn write(&mut self, event: RunLogEvent);
}

#[derive(Debug, Default)]
pub struct InMemoryRunLogWriter {
    events: Vec<RunLogEvent>,
}

impl InMemoryRunLogWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RunLogEvent] {
        &self.events
    }
}

impl RunLogWriter for InMemoryRunLogWriter {
    fn write(&mut self, event: RunLogEvent) {
        self.events.push(event);
    }
}

#[derive(Debug, Default)]
pub struct StderrRunLogWriter;

impl RunLogWriter for StderrRunLogWriter {
    fn write(&mut self, event: RunLogEvent) {
        match event.net_profit {
            Some(net_profit) => eprintln!(
                "step={} event={} net_profit={net_profit:.2}",
                event.step,
                event.kind.as_str()
            ),
            None => eprintln!("step={} event={}", event.step, event.kind.as_str()),
        }
    }
}

/// Emits the run's event trail: start, one event per executed hedge, end.
pub fn log_run_events(result: &RunResult, writer: &mut dyn RunLogWriter) {
    writer.write(RunLogEvent::new(0, RunLogEventKind::RunStarted, None));

    for record in &result.step_log {
        if let Some(fill) = record.action.fill() {
            writer.write(RunLogEvent::new(
                record.step,
                RunLogEventKind::RebalanceExecuted,
                Some(fill.net_profit),
            ));
        }
    }

    writer.write(RunLogEvent::new(
        result.step_log.len() as u64,
        RunLogEventKind::RunCompleted,
        None,
    ));
}
