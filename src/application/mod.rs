//! Application layer: Use cases and services.
//!
//! This module binds the mutable input record to the pure risk model
//! and fans fresh results out to observers.

mod report;
mod session;

pub use report::ScoreReport;
pub use session::CalculatorSession;
