//! Learned calorie model: least-squares regression over the three macro
//! inputs, persisted as a JSON artifact.
//!
//! Training labels come from the fixed formula (the dataset carries no
//! independent calorie ground truth), so a healthy fit recovers the
//! formula coefficients. Held-out metrics are logged anyway: if a real
//! label column ever replaces the derived one, the numbers move while the
//! plumbing stays put.

use std::fs;
use std::path::Path;

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::calories;
use crate::dataset;
use crate::error::{Error, ModelUnavailable, Result};
use crate::{log_error, log_info};

const ENABLE_LOGS: bool = true;

/// Fixed seed for the train/test split, for reproducible runs.
const SPLIT_SEED: u64 = 42;
const TEST_FRACTION: f64 = 0.2;

/// Pivots smaller than this make the normal matrix effectively singular.
const PIVOT_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalorieModel {
    /// kcal per gram of protein, carbs, fat
    pub coefficients: [f64; 3],
    pub intercept: f64,
}

impl CalorieModel {
    /// Load a persisted artifact. Any failure is the soft
    /// [`ModelUnavailable`], which the estimator recovers from.
    pub fn load(path: &Path) -> std::result::Result<Self, ModelUnavailable> {
        let raw = fs::read_to_string(path)
            .map_err(|err| ModelUnavailable(format!("read {}: {err}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|err| ModelUnavailable(format!("parse {}: {err}", path.display())))
    }

    /// Persist the artifact, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Predict calories for one macro triple.
    pub fn predict(
        &self,
        protein_g: f64,
        carbs_g: f64,
        fat_g: f64,
    ) -> std::result::Result<f64, ModelUnavailable> {
        let kcal = self.intercept
            + self.coefficients[0] * protein_g
            + self.coefficients[1] * carbs_g
            + self.coefficients[2] * fat_g;
        if kcal.is_finite() {
            Ok(kcal)
        } else {
            Err(ModelUnavailable("non-finite prediction".to_string()))
        }
    }
}

/// Train on the dataset at `data_path` and persist the artifact to
/// `model_path`. Labels are formula-derived; the split is 80/20 with a
/// fixed seed.
pub fn train(data_path: &Path, model_path: &Path) -> Result<CalorieModel> {
    let table = dataset::load(data_path).map_err(|err| {
        log_error!("training data unavailable: {err}");
        Error::TrainingData(Box::new(err))
    })?;

    let recipes = table.recipes();
    let n = recipes.len();

    let mut features = Array2::<f64>::zeros((n, 3));
    let mut labels = Array1::<f64>::zeros(n);
    for (i, recipe) in recipes.iter().enumerate() {
        features[[i, 0]] = recipe.protein_g;
        features[[i, 1]] = recipe.carbs_g;
        features[[i, 2]] = recipe.fat_g;
        labels[i] = calories::estimate(recipe.protein_g, recipe.carbs_g, recipe.fat_g);
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(SPLIT_SEED);
    indices.shuffle(&mut rng);

    let n_test = ((n as f64) * TEST_FRACTION).ceil() as usize;
    let (test_idx, train_idx) = indices.split_at(n_test.min(n));

    if train_idx.len() < 4 {
        return Err(Error::ModelFit(format!(
            "not enough training rows ({} after split) to fit 3 coefficients and an intercept",
            train_idx.len()
        )));
    }

    let model = fit_least_squares(&features, &labels, train_idx)?;

    if !test_idx.is_empty() {
        let (mae, r_squared) = evaluate(&model, &features, &labels, test_idx);
        log_info!(
            "calorie model trained on {} rows, evaluated on {}: MAE {:.4} kcal, R^2 {:.6}",
            train_idx.len(),
            test_idx.len(),
            mae,
            r_squared
        );
    }

    model.save(model_path)?;
    log_info!("calorie model saved to {}", model_path.display());

    Ok(model)
}

/// Ordinary least squares with an intercept, via the normal equations.
fn fit_least_squares(
    features: &Array2<f64>,
    labels: &Array1<f64>,
    rows: &[usize],
) -> Result<CalorieModel> {
    let m = rows.len();
    let mut design = Array2::<f64>::zeros((m, 4));
    let mut y = Array1::<f64>::zeros(m);
    for (out, &row) in rows.iter().enumerate() {
        design[[out, 0]] = 1.0;
        design[[out, 1]] = features[[row, 0]];
        design[[out, 2]] = features[[row, 1]];
        design[[out, 3]] = features[[row, 2]];
        y[out] = labels[row];
    }

    let normal = design.t().dot(&design);
    let moment = design.t().dot(&y);
    let solution = solve(normal, moment)
        .ok_or_else(|| Error::ModelFit("singular normal matrix".to_string()))?;

    Ok(CalorieModel {
        coefficients: [solution[1], solution[2], solution[3]],
        intercept: solution[0],
    })
}

/// MAE and R^2 over the held-out rows.
fn evaluate(
    model: &CalorieModel,
    features: &Array2<f64>,
    labels: &Array1<f64>,
    rows: &[usize],
) -> (f64, f64) {
    let m = rows.len() as f64;
    let mean: f64 = rows.iter().map(|&r| labels[r]).sum::<f64>() / m;

    let mut abs_err = 0.0;
    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for &row in rows {
        let predicted = model.intercept
            + model.coefficients[0] * features[[row, 0]]
            + model.coefficients[1] * features[[row, 1]]
            + model.coefficients[2] * features[[row, 2]];
        let actual = labels[row];
        abs_err += (predicted - actual).abs();
        ss_res += (predicted - actual).powi(2);
        ss_tot += (actual - mean).powi(2);
    }

    let r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 1.0 };
    (abs_err / m, r_squared)
}

/// Gaussian elimination with partial pivoting.
fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Option<Array1<f64>> {
    let n = b.len();
    for col in 0..n {
        let mut pivot = col;
        for row in col + 1..n {
            if a[[row, col]].abs() > a[[pivot, col]].abs() {
                pivot = row;
            }
        }
        if a[[pivot, col]].abs() < PIVOT_EPSILON {
            return None;
        }
        if pivot != col {
            for k in 0..n {
                a.swap([col, k], [pivot, k]);
            }
            b.swap(col, pivot);
        }
        for row in col + 1..n {
            let ratio = a[[row, col]] / a[[col, col]];
            for k in col..n {
                a[[row, k]] -= ratio * a[[col, k]];
            }
            b[row] -= ratio * b[col];
        }
    }

    let mut x = Array1::<f64>::zeros(n);
    for row in (0..n).rev() {
        let mut acc = b[row];
        for k in row + 1..n {
            acc -= a[[row, k]] * x[k];
        }
        x[row] = acc / a[[row, row]];
    }
    Some(x)
}
