//! One-shot scoring of a JSON input record.

use std::io::Read;

use serde::Serialize;

use crate::domain::{ClinicalInputs, RiskCalculator, RiskEvaluation};
use crate::EosError;

/// Inputs together with their evaluation, as printed by the headless scorer.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub inputs: ClinicalInputs,
    pub evaluation: RiskEvaluation,
    /// Sepsis risk per 1000 births
    pub risk_per_1000: f64,
}

impl ScoreReport {
    /// Validate `inputs` against slider bounds and evaluate them.
    ///
    /// # Errors
    /// Returns `EosError::Validation` listing every out-of-range input.
    pub fn score(inputs: ClinicalInputs) -> crate::Result<Self> {
        inputs
            .validate()
            .map_err(|errors| EosError::Validation(errors.join("; ")))?;

        let evaluation = RiskCalculator::evaluate(&inputs);
        tracing::debug!(
            logit = evaluation.result.logit,
            probability = evaluation.result.probability,
            "Scored input record"
        );

        Ok(Self {
            inputs,
            risk_per_1000: evaluation.result.per_1000_births(),
            evaluation,
        })
    }

    /// Parse a JSON `ClinicalInputs` object from `reader` and score it.
    ///
    /// Fields missing from the JSON take their default values.
    ///
    /// # Errors
    /// Returns `EosError::Io` or `EosError::Serialization` on unreadable
    /// input, `EosError::Validation` on out-of-range values.
    pub fn from_reader<R: Read>(mut reader: R) -> crate::Result<Self> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        let inputs: ClinicalInputs = serde_json::from_str(&raw)?;
        Self::score(inputs)
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// Returns `EosError::Serialization` if encoding fails.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
