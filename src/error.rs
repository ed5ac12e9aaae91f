//! Error types for the NutriSync core engine.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Hard failures surfaced to the caller. Estimation and recommendation
/// failures are not here: they degrade to safe defaults instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Dataset or profile file missing from disk
    #[error("data file not found: {}", .0.display())]
    DataNotFound(PathBuf),

    /// Dataset present but the macro columns could not be resolved
    #[error(
        "missing macro columns in dataset; available columns: {available:?} \
         (expected headers containing 'protein', 'carb' and 'fat')"
    )]
    Schema { available: Vec<String> },

    /// Loader failure while preparing training data
    #[error("failed to load/clean training data: {0}")]
    TrainingData(#[source] Box<Error>),

    /// Regression fit could not produce a model (e.g. singular normal matrix)
    #[error("model fit failed: {0}")]
    ModelFit(String),

    /// Profile failed range validation at save time
    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Soft failure: the trained calorie model is missing or unusable.
/// Recovered inside the estimator by falling back to the fixed formula;
/// never surfaced past it.
#[derive(Error, Debug)]
#[error("calorie model unavailable: {0}")]
pub struct ModelUnavailable(pub String);
