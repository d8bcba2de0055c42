//! Domain layer: Core types and the risk model.
//!
//! This module contains pure Rust types with no I/O.
//! Everything here is deterministic and serializable.

mod calculator;
mod evaluation;
mod inputs;
pub mod model;

pub use calculator::{RiskCalculator, ROM_EXPONENT, ROM_OFFSET_HOURS};
pub use evaluation::{logistic, RiskEvaluation, RiskResult, TransformedFeatures, WeightedFeatures};
pub use inputs::{format_gestational_age, ClinicalInputs, FieldControl, InputField, SliderBounds};
pub use model::Feature;
