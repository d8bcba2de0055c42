//! Calculator session: one mutable input record, re-evaluated on every change.
//!
//! The session is the only writer of its inputs. Each mutation:
//! 1. Snaps the new value onto the slider grid
//! 2. Re-runs the risk model
//! 3. Notifies observers in subscription order

use crate::domain::{ClinicalInputs, InputField, RiskCalculator, RiskEvaluation};
use crate::ports::RiskObserver;

/// Reactive binding between clinician inputs and the risk model.
pub struct CalculatorSession {
    /// Values restored by `reset()`
    defaults: ClinicalInputs,

    /// Current input record
    inputs: ClinicalInputs,

    /// Evaluation of `inputs`, always up to date
    evaluation: RiskEvaluation,

    observers: Vec<Box<dyn RiskObserver>>,
}

impl CalculatorSession {
    /// Create a session starting from `inputs`.
    ///
    /// Numeric inputs are snapped to their slider grid; the snapped record
    /// also becomes the target of `reset()`.
    #[must_use]
    pub fn new(inputs: ClinicalInputs) -> Self {
        let inputs = snap_all(inputs);
        Self {
            defaults: inputs,
            inputs,
            evaluation: RiskCalculator::evaluate(&inputs),
            observers: Vec::new(),
        }
    }

    /// Create a session with the model's default inputs.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ClinicalInputs::default())
    }

    /// Register an observer. It is notified immediately with the current state.
    pub fn subscribe(&mut self, mut observer: Box<dyn RiskObserver>) {
        observer.on_evaluation(&self.inputs, &self.evaluation);
        self.observers.push(observer);
    }

    #[must_use]
    pub fn inputs(&self) -> &ClinicalInputs {
        &self.inputs
    }

    #[must_use]
    pub fn evaluation(&self) -> &RiskEvaluation {
        &self.evaluation
    }

    /// Set a slider input, snapped and clamped to its bounds.
    ///
    /// Returns `false` (and changes nothing) if `field` is a checkbox.
    pub fn set_numeric(&mut self, field: InputField, value: f64) -> bool {
        let Some(bounds) = field.bounds() else {
            return false;
        };
        self.inputs.set_numeric(field, bounds.snap(value));
        self.recompute(field);
        true
    }

    /// Move a slider input by whole steps (negative moves down).
    ///
    /// Returns `false` (and changes nothing) if `field` is a checkbox.
    pub fn step(&mut self, field: InputField, steps: i64) -> bool {
        let (Some(bounds), Some(current)) = (field.bounds(), self.inputs.numeric(field)) else {
            return false;
        };
        self.inputs.set_numeric(field, bounds.step_by(current, steps));
        self.recompute(field);
        true
    }

    /// Set a checkbox input.
    ///
    /// Returns `false` (and changes nothing) if `field` is a slider.
    pub fn set_flag(&mut self, field: InputField, value: bool) -> bool {
        if !self.inputs.set_flag(field, value) {
            return false;
        }
        self.recompute(field);
        true
    }

    /// Flip a checkbox input.
    ///
    /// Returns `false` (and changes nothing) if `field` is a slider.
    pub fn toggle(&mut self, field: InputField) -> bool {
        match self.inputs.flag(field) {
            Some(current) => self.set_flag(field, !current),
            None => false,
        }
    }

    /// Replace the whole input record.
    pub fn replace(&mut self, inputs: ClinicalInputs) {
        self.inputs = snap_all(inputs);
        self.refresh();
    }

    /// Restore the inputs the session was created with.
    pub fn reset(&mut self) {
        tracing::debug!("Resetting calculator inputs to defaults");
        self.inputs = self.defaults;
        self.refresh();
    }

    fn recompute(&mut self, field: InputField) {
        tracing::trace!(field = ?field, "Input changed");
        self.refresh();
    }

    fn refresh(&mut self) {
        self.evaluation = RiskCalculator::evaluate(&self.inputs);
        for observer in self.observers.iter_mut() {
            observer.on_evaluation(&self.inputs, &self.evaluation);
        }
    }
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn snap_all(mut inputs: ClinicalInputs) -> ClinicalInputs {
    for field in InputField::ALL {
        if let (Some(bounds), Some(value)) = (field.bounds(), inputs.numeric(field)) {
            inputs.set_numeric(field, bounds.snap(value));
        }
    }
    inputs
}
