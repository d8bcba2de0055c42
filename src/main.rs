//! eoscalc: Neonatal early-onset sepsis risk calculator
//!
//! Main entry point for the terminal application.

use anyhow::Result;

use eoscalc::adapters::logging;
use eoscalc::config::AppConfig;
use eoscalc::tui::App;

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    // Keep the guard alive so buffered log lines are flushed on exit.
    let _guard = logging::init(&config)?;

    tracing::info!(
        baseline_incidence = config.baseline_incidence,
        "Starting eoscalc..."
    );

    let mut app = App::new(&config);
    app.run()?;

    tracing::info!("eoscalc shutdown complete.");
    Ok(())
}
