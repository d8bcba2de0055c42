//! Evaluation results: intermediate features, logit and probability.

use serde::{Deserialize, Serialize};

use super::model::Feature;

/// Logistic function mapping a logit to a probability.
#[must_use]
pub fn logistic(logit: f64) -> f64 {
    1.0 / (1.0 + (-logit).exp())
}

/// Inputs after the model's feature transforms, before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformedFeatures {
    /// Intercept looked up from the EOS incidence
    pub intercept: f64,
    /// Maternal temperature in degrees Fahrenheit
    pub temperature_f: f64,
    /// `(rom_hours + 0.05)^0.2`
    pub rupture_of_membranes: f64,
    pub gestational_age: f64,
    pub gestational_age_squared: f64,
    pub antibiotics_given_early: f64,
    pub antibiotics_2_to_4h_prior: f64,
    pub gbs_positive: f64,
    pub gbs_unknown: f64,
}

impl TransformedFeatures {
    /// Transformed value of a weighted feature.
    #[must_use]
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::TemperatureF => self.temperature_f,
            Feature::RuptureOfMembranes => self.rupture_of_membranes,
            Feature::GestationalAge => self.gestational_age,
            Feature::GestationalAgeSquared => self.gestational_age_squared,
            Feature::AntibioticsGivenEarly => self.antibiotics_given_early,
            Feature::Antibiotics2To4hPrior => self.antibiotics_2_to_4h_prior,
            Feature::GbsPositive => self.gbs_positive,
            Feature::GbsUnknown => self.gbs_unknown,
        }
    }
}

/// Transformed features multiplied by their coefficients.
///
/// The intercept carries an implicit weight of 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedFeatures {
    pub intercept: f64,
    pub temperature_f: f64,
    pub rupture_of_membranes: f64,
    pub gestational_age: f64,
    pub gestational_age_squared: f64,
    pub antibiotics_given_early: f64,
    pub antibiotics_2_to_4h_prior: f64,
    pub gbs_positive: f64,
    pub gbs_unknown: f64,
}

impl WeightedFeatures {
    /// Weight every transformed feature with its model coefficient.
    #[must_use]
    pub fn from_transformed(t: &TransformedFeatures) -> Self {
        let w = |feature: Feature| t.get(feature) * feature.coefficient();
        Self {
            intercept: t.intercept,
            temperature_f: w(Feature::TemperatureF),
            rupture_of_membranes: w(Feature::RuptureOfMembranes),
            gestational_age: w(Feature::GestationalAge),
            gestational_age_squared: w(Feature::GestationalAgeSquared),
            antibiotics_given_early: w(Feature::AntibioticsGivenEarly),
            antibiotics_2_to_4h_prior: w(Feature::Antibiotics2To4hPrior),
            gbs_positive: w(Feature::GbsPositive),
            gbs_unknown: w(Feature::GbsUnknown),
        }
    }

    /// Weighted value of a feature.
    #[must_use]
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::TemperatureF => self.temperature_f,
            Feature::RuptureOfMembranes => self.rupture_of_membranes,
            Feature::GestationalAge => self.gestational_age,
            Feature::GestationalAgeSquared => self.gestational_age_squared,
            Feature::AntibioticsGivenEarly => self.antibiotics_given_early,
            Feature::Antibiotics2To4hPrior => self.antibiotics_2_to_4h_prior,
            Feature::GbsPositive => self.gbs_positive,
            Feature::GbsUnknown => self.gbs_unknown,
        }
    }

    /// Sum of all terms: the logit.
    ///
    /// Summed intercept first, then features in `Feature::ALL` order.
    #[must_use]
    pub fn sum(&self) -> f64 {
        Feature::ALL
            .iter()
            .fold(self.intercept, |acc, feature| acc + self.get(*feature))
    }
}

/// Final model output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    /// Linear predictor (weighted sum including intercept)
    pub logit: f64,
    /// Sepsis risk, `1 / (1 + e^-logit)`
    pub probability: f64,
}

impl RiskResult {
    #[must_use]
    pub fn from_logit(logit: f64) -> Self {
        Self {
            logit,
            probability: logistic(logit),
        }
    }

    /// Expected EOS cases per 1000 births.
    #[must_use]
    pub fn per_1000_births(&self) -> f64 {
        self.probability * 1000.0
    }
}

/// Everything computed in one evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskEvaluation {
    pub transformed: TransformedFeatures,
    pub weighted: WeightedFeatures,
    pub result: RiskResult,
}
