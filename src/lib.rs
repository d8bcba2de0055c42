//! # eoscalc
//!
//! Neonatal early-onset sepsis (EOS) risk calculator.
//!
//! This crate provides:
//! - The published logistic-regression EOS risk model as a pure function
//! - A reactive calculator session that re-scores on every input change
//! - Terminal UI for interactive, local-only use
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Inputs, model constants and the risk calculator
//! - `ports`: Trait definitions for result observers
//! - `adapters`: Concrete implementations (tracing)
//! - `application`: The calculator session
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{ClinicalInputs, RiskCalculator, RiskEvaluation, RiskResult};

/// Result type for eoscalc operations
pub type Result<T> = std::result::Result<T, EosError>;

/// Main error type for eoscalc
#[derive(Debug, thiserror::Error)]
pub enum EosError {
    #[error("Invalid clinical input: {0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
