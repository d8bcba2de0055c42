//! Clinical inputs entered by the clinician.
//!
//! Every numeric input behaves like a bounded slider: values live on the
//! grid `min + k * step` inside `[min, max]`.

use serde::{Deserialize, Serialize};

/// Bounds and step size of a slider-style numeric input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// Decimal places kept after snapping, so `0.1 + 7 * 0.1` lands on `0.8`.
const SNAP_PRECISION: f64 = 1e9;

impl SliderBounds {
    #[must_use]
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Index of the last grid point.
    fn last_index(&self) -> i64 {
        ((self.max - self.min) / self.step).round() as i64
    }

    /// Grid index closest to `value`, clamped to the slider range.
    #[must_use]
    pub fn index_of(&self, value: f64) -> i64 {
        // NaN casts to 0, i.e. the slider minimum.
        (((value - self.min) / self.step).round() as i64).clamp(0, self.last_index())
    }

    /// Value of the grid point at `index`, clamped to the slider range.
    #[must_use]
    pub fn value_at(&self, index: i64) -> f64 {
        let index = index.clamp(0, self.last_index());
        if index == self.last_index() {
            return self.max;
        }
        let raw = self.min + index as f64 * self.step;
        (raw * SNAP_PRECISION).round() / SNAP_PRECISION
    }

    /// Snap an arbitrary value to the nearest grid point inside the range.
    #[must_use]
    pub fn snap(&self, value: f64) -> f64 {
        self.value_at(self.index_of(value))
    }

    /// Move `steps` grid points away from `value` (negative moves down).
    ///
    /// Stepping is done on grid indices, so repeated steps never drift.
    #[must_use]
    pub fn step_by(&self, value: f64, steps: i64) -> f64 {
        self.value_at(self.index_of(value).saturating_add(steps))
    }

    /// Whether `value` lies within the slider range.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min - 1e-9 && value <= self.max + 1e-9
    }
}

/// How an input is edited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldControl {
    Slider(SliderBounds),
    Checkbox,
}

/// One editable clinical input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    EosIncidence,
    MaternalTemp,
    RuptureOfMembranes,
    GestationalAge,
    AntibioticsGivenEarly,
    Antibiotics2To4hPrior,
    GbsPositive,
    GbsUnknown,
}

impl InputField {
    /// All inputs, in display order.
    pub const ALL: [InputField; 8] = [
        Self::EosIncidence,
        Self::MaternalTemp,
        Self::RuptureOfMembranes,
        Self::GestationalAge,
        Self::AntibioticsGivenEarly,
        Self::Antibiotics2To4hPrior,
        Self::GbsPositive,
        Self::GbsUnknown,
    ];

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::EosIncidence => "EOS Incidence (per 1000 births)",
            Self::MaternalTemp => "Highest Maternal Temperature (C)",
            Self::RuptureOfMembranes => "Rupture of Membranes (hours)",
            Self::GestationalAge => "Gestational Age (weeks)",
            Self::AntibioticsGivenEarly => "Broad Spectrum antibiotics given >4h",
            Self::Antibiotics2To4hPrior => "Broad Spectrum 2-4h / GBS-specific >2h",
            Self::GbsPositive => "GBS Positive",
            Self::GbsUnknown => "GBS Unknown",
        }
    }

    #[must_use]
    pub fn control(&self) -> FieldControl {
        match self {
            Self::EosIncidence => FieldControl::Slider(SliderBounds::new(0.1, 1.0, 0.1)),
            Self::MaternalTemp => FieldControl::Slider(SliderBounds::new(35.0, 41.0, 0.1)),
            Self::RuptureOfMembranes => FieldControl::Slider(SliderBounds::new(0.0, 240.0, 1.0)),
            Self::GestationalAge => FieldControl::Slider(SliderBounds::new(34.0, 43.0, 1.0 / 7.0)),
            Self::AntibioticsGivenEarly
            | Self::Antibiotics2To4hPrior
            | Self::GbsPositive
            | Self::GbsUnknown => FieldControl::Checkbox,
        }
    }

    /// Slider bounds, or `None` for checkboxes.
    #[must_use]
    pub fn bounds(&self) -> Option<SliderBounds> {
        match self.control() {
            FieldControl::Slider(bounds) => Some(bounds),
            FieldControl::Checkbox => None,
        }
    }
}

/// The clinician-entered record the risk model is evaluated on.
///
/// The antibiotic-timing flags and the GBS-status flags are clinically
/// exclusive pairs, but nothing here prevents both being set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicalInputs {
    /// Local EOS incidence per 1000 live births (0.1 - 1.0)
    pub eos_incidence: f64,

    /// Highest maternal intrapartum temperature in degrees Celsius
    pub maternal_temp_c: f64,

    /// Hours from rupture of membranes to delivery
    pub rupture_of_membranes_hours: f64,

    /// Gestational age in weeks (fractional, in 1/7 week steps)
    pub gestational_age_weeks: f64,

    /// Broad spectrum antibiotics given more than 4h before delivery
    pub antibiotics_given_early: bool,

    /// Broad spectrum antibiotics 2-4h, or GBS-specific antibiotics >2h, before delivery
    pub antibiotics_2_to_4h_prior: bool,

    pub gbs_positive: bool,

    pub gbs_unknown: bool,
}

impl Default for ClinicalInputs {
    fn default() -> Self {
        Self {
            eos_incidence: 0.8,
            maternal_temp_c: 37.0,
            rupture_of_membranes_hours: 12.0,
            gestational_age_weeks: 40.0,
            antibiotics_given_early: false,
            antibiotics_2_to_4h_prior: false,
            gbs_positive: false,
            gbs_unknown: false,
        }
    }
}

impl ClinicalInputs {
    /// Current value of a numeric input, `None` for checkboxes.
    #[must_use]
    pub fn numeric(&self, field: InputField) -> Option<f64> {
        match field {
            InputField::EosIncidence => Some(self.eos_incidence),
            InputField::MaternalTemp => Some(self.maternal_temp_c),
            InputField::RuptureOfMembranes => Some(self.rupture_of_membranes_hours),
            InputField::GestationalAge => Some(self.gestational_age_weeks),
            _ => None,
        }
    }

    /// Current value of a checkbox input, `None` for sliders.
    #[must_use]
    pub fn flag(&self, field: InputField) -> Option<bool> {
        match field {
            InputField::AntibioticsGivenEarly => Some(self.antibiotics_given_early),
            InputField::Antibiotics2To4hPrior => Some(self.antibiotics_2_to_4h_prior),
            InputField::GbsPositive => Some(self.gbs_positive),
            InputField::GbsUnknown => Some(self.gbs_unknown),
            _ => None,
        }
    }

    /// Set a numeric input as-is. Returns `false` if `field` is a checkbox.
    pub fn set_numeric(&mut self, field: InputField, value: f64) -> bool {
        let slot = match field {
            InputField::EosIncidence => &mut self.eos_incidence,
            InputField::MaternalTemp => &mut self.maternal_temp_c,
            InputField::RuptureOfMembranes => &mut self.rupture_of_membranes_hours,
            InputField::GestationalAge => &mut self.gestational_age_weeks,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// Set a checkbox input. Returns `false` if `field` is a slider.
    pub fn set_flag(&mut self, field: InputField, value: bool) -> bool {
        let slot = match field {
            InputField::AntibioticsGivenEarly => &mut self.antibiotics_given_early,
            InputField::Antibiotics2To4hPrior => &mut self.antibiotics_2_to_4h_prior,
            InputField::GbsPositive => &mut self.gbs_positive,
            InputField::GbsUnknown => &mut self.gbs_unknown,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// Check every numeric input against its slider bounds.
    ///
    /// # Errors
    /// Returns one message per out-of-range input.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let errors: Vec<String> = InputField::ALL
            .iter()
            .filter_map(|field| {
                let bounds = field.bounds()?;
                let value = self.numeric(*field)?;
                (!bounds.contains(value)).then(|| {
                    format!(
                        "{} {} out of range [{}, {}]",
                        field.label(),
                        value,
                        bounds.min,
                        bounds.max
                    )
                })
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Render fractional weeks as `"40 weeks 3 days"`.
#[must_use]
pub fn format_gestational_age(weeks: f64) -> String {
    let whole = weeks.floor();
    let days = ((weeks - whole) * 7.0).round();
    format!("{} weeks {} days", whole as i64, days as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let inputs = ClinicalInputs::default();
        assert!((inputs.eos_incidence - 0.8).abs() < f64::EPSILON);
        assert!((inputs.maternal_temp_c - 37.0).abs() < f64::EPSILON);
        assert!((inputs.rupture_of_membranes_hours - 12.0).abs() < f64::EPSILON);
        assert!((inputs.gestational_age_weeks - 40.0).abs() < f64::EPSILON);
        assert!(!inputs.antibiotics_given_early);
        assert!(!inputs.gbs_unknown);
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_snap_lands_on_exact_grid_values() {
        let bounds = SliderBounds::new(0.1, 1.0, 0.1);
        assert_eq!(bounds.snap(0.8), 0.8);
        assert_eq!(bounds.snap(0.74), 0.7);
        assert_eq!(bounds.snap(0.5), 0.5);
        assert_eq!(bounds.step_by(0.1, 7), 0.8);
    }

    #[test]
    fn test_snap_clamps_to_range() {
        let bounds = SliderBounds::new(35.0, 41.0, 0.1);
        assert_eq!(bounds.snap(12.0), 35.0);
        assert_eq!(bounds.snap(99.0), 41.0);
        assert_eq!(bounds.snap(f64::NAN), 35.0);
        assert_eq!(bounds.step_by(41.0, 5), 41.0);
        assert_eq!(bounds.step_by(35.0, -5), 35.0);
    }

    #[test]
    fn test_gestational_age_steps_do_not_drift() {
        let bounds = InputField::GestationalAge.bounds().expect("slider");
        let mut weeks = 34.0;
        for _ in 0..(9 * 7) {
            weeks = bounds.step_by(weeks, 1);
        }
        assert_eq!(weeks, 43.0);

        let mut weeks = 40.0;
        for _ in 0..3 {
            weeks = bounds.step_by(weeks, 1);
        }
        assert_eq!(format_gestational_age(weeks), "40 weeks 3 days");
        for _ in 0..3 {
            weeks = bounds.step_by(weeks, -1);
        }
        assert_eq!(weeks, 40.0);
    }

    #[test]
    fn test_format_gestational_age() {
        assert_eq!(format_gestational_age(40.0), "40 weeks 0 days");
        assert_eq!(format_gestational_age(34.0 + 6.0 / 7.0), "34 weeks 6 days");
    }

    #[test]
    fn test_field_accessors() {
        let mut inputs = ClinicalInputs::default();
        assert!(inputs.set_numeric(InputField::RuptureOfMembranes, 30.0));
        assert_eq!(inputs.numeric(InputField::RuptureOfMembranes), Some(30.0));
        assert!(!inputs.set_numeric(InputField::GbsPositive, 1.0));
        assert!(inputs.set_flag(InputField::GbsPositive, true));
        assert_eq!(inputs.flag(InputField::GbsPositive), Some(true));
        assert!(!inputs.set_flag(InputField::MaternalTemp, true));
        assert_eq!(inputs.flag(InputField::MaternalTemp), None);
    }

    #[test]
    fn test_validation_reports_each_violation() {
        let inputs = ClinicalInputs {
            eos_incidence: 2.0,
            rupture_of_membranes_hours: -1.0,
            ..Default::default()
        };
        let errors = inputs.validate().expect_err("should be invalid");
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("EOS Incidence"));
    }

    #[test]
    fn test_exclusive_flags_are_not_enforced() {
        let mut inputs = ClinicalInputs::default();
        inputs.set_flag(InputField::GbsPositive, true);
        inputs.set_flag(InputField::GbsUnknown, true);
        assert!(inputs.gbs_positive && inputs.gbs_unknown);
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_missing_json_fields_take_defaults() {
        let inputs: ClinicalInputs =
            serde_json::from_str(r#"{"gbs_positive": true, "maternal_temp_c": 38.5}"#)
                .expect("Should parse");
        assert!(inputs.gbs_positive);
        assert!((inputs.maternal_temp_c - 38.5).abs() < f64::EPSILON);
        assert!((inputs.eos_incidence - 0.8).abs() < f64::EPSILON);
    }
}
