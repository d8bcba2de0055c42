//! TUI module: Terminal User Interface using Ratatui.
//!
//! A single interactive calculator screen plus an about screen with the
//! model's provenance and constants.

mod app;
mod styles;
mod ui;

pub use app::{App, Screen};
pub use styles::MedicalTheme;
