//! Calorie estimation from macro grams.
//!
//! The fixed linear formula (4/4/9 kcal per gram of protein/carbs/fat) is
//! the baseline every consumer can rely on. A trained regression artifact
//! may refine it; when that artifact is missing or unusable the estimator
//! falls back to the formula and says so in the result.

pub mod model;

pub use model::{train, CalorieModel};

use std::path::Path;

use serde::Serialize;

const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// Fixed linear estimate. Always succeeds.
pub fn estimate(protein_g: f64, carbs_g: f64, fat_g: f64) -> f64 {
    KCAL_PER_G_PROTEIN * protein_g + KCAL_PER_G_CARBS * carbs_g + KCAL_PER_G_FAT * fat_g
}

/// Where an estimate came from, so callers can tell degraded mode
/// (formula fallback) from nominal mode (trained model).
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum EstimateSource {
    Formula,
    Model,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CalorieEstimate {
    pub kcal: f64,
    pub source: EstimateSource,
}

/// Estimate with the trained model at `model_path`, falling back to the
/// fixed formula when the artifact is missing or prediction fails. Never
/// errors.
pub fn estimate_model(
    model_path: &Path,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
) -> CalorieEstimate {
    match CalorieModel::load(model_path).and_then(|m| m.predict(protein_g, carbs_g, fat_g)) {
        Ok(kcal) => CalorieEstimate {
            kcal,
            source: EstimateSource::Model,
        },
        Err(err) => {
            log::warn!("{err}; using formula estimate");
            CalorieEstimate {
                kcal: estimate(protein_g, carbs_g, fat_g),
                source: EstimateSource::Formula,
            }
        }
    }
}
