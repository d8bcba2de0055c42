//! Published regression constants of the EOS risk model.
//!
//! Model derived in Puopolo et al. 2011 (doi:10.1542/peds.2010-3464),
//! complete weights reported in van der Weijden et al. 2024
//! (doi:10.1016/S2589-7500(23)00253-4).

use serde::{Deserialize, Serialize};

/// Model intercept for each supported EOS incidence (per 1000 births).
///
/// Keys are in ascending order; the nearest-match lookup relies on it.
pub const INTERCEPT_TABLE: [(f64, f64); 10] = [
    (0.1, 38.952265),
    (0.2, 39.646367),
    (0.3, 40.0528),
    (0.4, 40.3415),
    (0.5, 40.5656),
    (0.6, 40.7489),
    (0.7, 40.903919),
    (0.8, 41.0384),
    (0.9, 41.1571),
    (1.0, 41.263432),
];

/// Look up the intercept for the table key closest to `eos_incidence`.
///
/// On an exact tie the earlier (smaller) key wins.
#[must_use]
pub fn nearest_intercept(eos_incidence: f64) -> f64 {
    nearest_entry(eos_incidence).1
}

/// The `(incidence, intercept)` entry closest to `eos_incidence`.
#[must_use]
pub fn nearest_entry(eos_incidence: f64) -> (f64, f64) {
    INTERCEPT_TABLE[1..]
        .iter()
        .fold(INTERCEPT_TABLE[0], |best, &candidate| {
            if (candidate.0 - eos_incidence).abs() < (best.0 - eos_incidence).abs() {
                candidate
            } else {
                best
            }
        })
}

/// A weighted model feature (everything except the intercept).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    TemperatureF,
    RuptureOfMembranes,
    GestationalAge,
    GestationalAgeSquared,
    AntibioticsGivenEarly,
    Antibiotics2To4hPrior,
    GbsPositive,
    GbsUnknown,
}

impl Feature {
    /// All weighted features, in summation order.
    pub const ALL: [Feature; 8] = [
        Self::TemperatureF,
        Self::RuptureOfMembranes,
        Self::GestationalAge,
        Self::GestationalAgeSquared,
        Self::AntibioticsGivenEarly,
        Self::Antibiotics2To4hPrior,
        Self::GbsPositive,
        Self::GbsUnknown,
    ];

    /// Regression weight of this feature.
    #[must_use]
    pub fn coefficient(&self) -> f64 {
        match self {
            Self::TemperatureF => 0.868,
            Self::RuptureOfMembranes => 1.2256,
            Self::GestationalAge => -6.9325,
            Self::GestationalAgeSquared => 0.0877,
            Self::AntibioticsGivenEarly => -1.1861,
            Self::Antibiotics2To4hPrior => -1.0488,
            Self::GbsPositive => 0.5771,
            Self::GbsUnknown => 0.0427,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::TemperatureF => "temperature_f",
            Self::RuptureOfMembranes => "rupture_of_membranes",
            Self::GestationalAge => "gestational_age",
            Self::GestationalAgeSquared => "gestational_age_squared",
            Self::AntibioticsGivenEarly => "antibiotics_given_early",
            Self::Antibiotics2To4hPrior => "antibiotics_2_to_4h_prior",
            Self::GbsPositive => "gbs_positive",
            Self::GbsUnknown => "gbs_unknown",
        }
    }
}
