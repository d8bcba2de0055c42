//! Logging setup and a tracing-backed risk observer.
//!
//! Writing logs to the terminal corrupts the TUI (alternate screen), so in
//! `auto` mode an interactive session logs to a file and anything else
//! logs to stdout.

use std::io::IsTerminal;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::AppConfig;
use crate::domain::{ClinicalInputs, RiskEvaluation};
use crate::ports::RiskObserver;

/// Install the global tracing subscriber.
///
/// The returned guard flushes buffered log lines when dropped; keep it
/// alive for the lifetime of the process.
///
/// # Errors
/// Returns `EosError::Io` if the log file cannot be opened.
pub fn init(config: &AppConfig) -> crate::Result<WorkerGuard> {
    let interactive = std::io::stdout().is_terminal();
    let use_file = config.log_mode.use_file(interactive);

    let (writer, guard) = if use_file {
        if let Some(parent) = config.log_file.parent() {
            // Best-effort: an unwritable directory surfaces as an open error below.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(!use_file),
        )
        .init();

    Ok(guard)
}

/// Install a stderr-only subscriber for command-line tools whose stdout
/// carries their actual output.
pub fn init_stderr() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Observer that records every evaluation as a debug event.
#[derive(Debug, Default)]
pub struct TracingObserver {
    evaluations: u64,
}

impl TracingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of evaluations observed so far.
    #[must_use]
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }
}

impl RiskObserver for TracingObserver {
    fn on_evaluation(&mut self, inputs: &ClinicalInputs, evaluation: &RiskEvaluation) {
        self.evaluations += 1;
        tracing::debug!(
            eos_incidence = inputs.eos_incidence,
            maternal_temp_c = inputs.maternal_temp_c,
            rom_hours = inputs.rupture_of_membranes_hours,
            ga_weeks = inputs.gestational_age_weeks,
            logit = evaluation.result.logit,
            probability = evaluation.result.probability,
            per_1000 = evaluation.result.per_1000_births(),
            "Risk re-evaluated"
        );
    }
}
