//! Profile-derived energy metrics.
//!
//! Pure functions over a [`UserProfile`]; nothing here touches disk and
//! values are only recomputed when the profile changes.

use serde::Serialize;

use crate::models::{Gender, UserProfile};

/// BMI, BMR, TDEE and the goal-adjusted calorie target for one profile.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ProfileMetrics {
    pub bmi: f64,
    pub bmr: f64,
    pub tdee: f64,
    pub target_calories: f64,
}

/// Compute all metrics for a profile. Mifflin-St Jeor BMR, scaled by the
/// activity factor, then by the goal.
pub fn compute_metrics(profile: &UserProfile) -> ProfileMetrics {
    let height_m = profile.height_cm / 100.0;
    let bmi = profile.weight_kg / (height_m * height_m);

    let bmr = basal_metabolic_rate(profile);
    let tdee = bmr * profile.activity_level.factor();
    let target_calories = tdee * profile.goal.calorie_scale();

    ProfileMetrics {
        bmi,
        bmr,
        tdee,
        target_calories,
    }
}

fn basal_metabolic_rate(profile: &UserProfile) -> f64 {
    let base =
        10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * f64::from(profile.age);
    match profile.gender {
        Gender::Male => base + 5.0,
        Gender::Female | Gender::Other => base - 161.0,
    }
}
