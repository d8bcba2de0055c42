//! The EOS risk calculator: a pure function of the clinical inputs.

use super::evaluation::{RiskEvaluation, RiskResult, TransformedFeatures, WeightedFeatures};
use super::inputs::ClinicalInputs;
use super::model::nearest_intercept;

/// Offset added to the rupture-of-membranes hours before the power transform.
pub const ROM_OFFSET_HOURS: f64 = 0.05;

/// Exponent of the rupture-of-membranes power transform.
pub const ROM_EXPONENT: f64 = 0.2;

/// Stateless evaluator of the logistic EOS risk model.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskCalculator;

impl RiskCalculator {
    /// Apply the model's feature transforms.
    #[must_use]
    pub fn transform(inputs: &ClinicalInputs) -> TransformedFeatures {
        let ga = inputs.gestational_age_weeks;
        TransformedFeatures {
            intercept: nearest_intercept(inputs.eos_incidence),
            temperature_f: celsius_to_fahrenheit(inputs.maternal_temp_c),
            rupture_of_membranes: (inputs.rupture_of_membranes_hours + ROM_OFFSET_HOURS)
                .powf(ROM_EXPONENT),
            gestational_age: ga,
            gestational_age_squared: ga.powi(2),
            antibiotics_given_early: indicator(inputs.antibiotics_given_early),
            antibiotics_2_to_4h_prior: indicator(inputs.antibiotics_2_to_4h_prior),
            gbs_positive: indicator(inputs.gbs_positive),
            gbs_unknown: indicator(inputs.gbs_unknown),
        }
    }

    /// Run the full model: transform, weight, sum, logistic.
    #[must_use]
    pub fn evaluate(inputs: &ClinicalInputs) -> RiskEvaluation {
        let transformed = Self::transform(inputs);
        let weighted = WeightedFeatures::from_transformed(&transformed);
        let result = RiskResult::from_logit(weighted.sum());

        RiskEvaluation {
            transformed,
            weighted,
            result,
        }
    }

    /// Logit and probability only.
    #[must_use]
    pub fn score(inputs: &ClinicalInputs) -> RiskResult {
        Self::evaluate(inputs).result
    }
}

fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Feature;

    #[test]
    fn test_default_inputs_reference_values() {
        let eval = RiskCalculator::evaluate(&ClinicalInputs::default());

        assert_eq!(eval.transformed.intercept, 41.0384);
        assert!((eval.transformed.temperature_f - 98.6).abs() < 1e-9);
        assert!((eval.transformed.rupture_of_membranes - 1.64511).abs() < 1e-4);
        assert_eq!(eval.transformed.gestational_age_squared, 1600.0);

        let expected_logit = 41.0384
            + 98.6 * 0.868
            + 12.05f64.powf(0.2) * 1.2256
            + 40.0 * -6.9325
            + 1600.0 * 0.0877;
        assert!((eval.result.logit - expected_logit).abs() < 1e-9);
        assert!((eval.result.logit - (-8.3406)).abs() < 1e-3);
        assert!((eval.result.probability - 0.000239).abs() < 1e-5);
        assert!((eval.result.probability - 1.0 / (1.0 + (-expected_logit).exp())).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_is_pure() {
        let inputs = ClinicalInputs {
            maternal_temp_c: 38.9,
            rupture_of_membranes_hours: 36.0,
            gbs_positive: true,
            ..Default::default()
        };
        let first = RiskCalculator::evaluate(&inputs);
        let second = RiskCalculator::evaluate(&inputs);
        assert_eq!(first, second);
        assert_eq!(RiskCalculator::score(&inputs), first.result);
    }

    #[test]
    fn test_flags_off_weigh_exactly_zero() {
        let eval = RiskCalculator::evaluate(&ClinicalInputs::default());
        assert_eq!(eval.weighted.antibiotics_given_early, 0.0);
        assert_eq!(eval.weighted.antibiotics_2_to_4h_prior, 0.0);
        assert_eq!(eval.weighted.gbs_positive, 0.0);
        assert_eq!(eval.weighted.gbs_unknown, 0.0);
    }

    #[test]
    fn test_flags_on_weigh_their_coefficient() {
        let inputs = ClinicalInputs {
            antibiotics_given_early: true,
            antibiotics_2_to_4h_prior: true,
            gbs_positive: true,
            gbs_unknown: true,
            ..Default::default()
        };
        let eval = RiskCalculator::evaluate(&inputs);
        for feature in [
            Feature::AntibioticsGivenEarly,
            Feature::Antibiotics2To4hPrior,
            Feature::GbsPositive,
            Feature::GbsUnknown,
        ] {
            assert_eq!(eval.transformed.get(feature), 1.0);
            assert_eq!(eval.weighted.get(feature), feature.coefficient());
        }
    }

    #[test]
    fn test_intercept_is_unweighted() {
        let eval = RiskCalculator::evaluate(&ClinicalInputs {
            eos_incidence: 0.5,
            ..Default::default()
        });
        assert_eq!(eval.transformed.intercept, 40.5656);
        assert_eq!(eval.weighted.intercept, 40.5656);
    }

    #[test]
    fn test_risk_factors_move_probability() {
        let baseline = RiskCalculator::score(&ClinicalInputs::default());

        let febrile = RiskCalculator::score(&ClinicalInputs {
            maternal_temp_c: 39.0,
            ..Default::default()
        });
        assert!(febrile.probability > baseline.probability);

        let treated = RiskCalculator::score(&ClinicalInputs {
            antibiotics_given_early: true,
            ..Default::default()
        });
        assert!(treated.probability < baseline.probability);

        let higher_incidence = RiskCalculator::score(&ClinicalInputs {
            eos_incidence: 1.0,
            ..Default::default()
        });
        assert!(higher_incidence.logit > baseline.logit);
    }
}
