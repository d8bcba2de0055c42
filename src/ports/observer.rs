//! Observer port: the render callback of the calculator session.

use crate::domain::{ClinicalInputs, RiskEvaluation};

/// Receives every fresh evaluation produced by a session.
///
/// Implementations are called synchronously, once per input mutation,
/// in the order they were subscribed.
pub trait RiskObserver {
    /// Called with the current inputs and the evaluation derived from them.
    fn on_evaluation(&mut self, inputs: &ClinicalInputs, evaluation: &RiskEvaluation);
}

impl<F> RiskObserver for F
where
    F: FnMut(&ClinicalInputs, &RiskEvaluation),
{
    fn on_evaluation(&mut self, inputs: &ClinicalInputs, evaluation: &RiskEvaluation) {
        self(inputs, evaluation);
    }
}
