//! User profile data model.
//!
//! One profile per installation, saved wholesale — no partial updates.
//! Field defaults mirror the values a fresh profile form starts from, so a
//! record missing keys still loads sensibly.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    #[serde(rename = "Very Active")]
    VeryActive,
}

impl ActivityLevel {
    /// Multiplier applied to BMR to estimate TDEE.
    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::VeryActive => 1.725,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::Light => "Light",
            ActivityLevel::Moderate => "Moderate",
            ActivityLevel::VeryActive => "Very Active",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Goal {
    #[default]
    Maintain,
    #[serde(rename = "Weight Loss")]
    WeightLoss,
    #[serde(rename = "Weight Gain")]
    WeightGain,
}

impl Goal {
    /// Scale applied to TDEE to get the daily calorie target.
    pub fn calorie_scale(&self) -> f64 {
        match self {
            Goal::Maintain => 1.0,
            Goal::WeightLoss => 0.85,
            Goal::WeightGain => 1.1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Maintain => "Maintain",
            Goal::WeightLoss => "Weight Loss",
            Goal::WeightGain => "Weight Gain",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_age")]
    pub age: u32,
    #[serde(default)]
    pub gender: Gender,
    #[serde(rename = "height", default = "default_height")]
    pub height_cm: f64,
    #[serde(rename = "weight", default = "default_weight")]
    pub weight_kg: f64,
    #[serde(rename = "activity", default)]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub goal: Goal,
    #[serde(default = "default_diet_type")]
    pub diet_type: String,
}

fn default_age() -> u32 {
    25
}

fn default_height() -> f64 {
    170.0
}

fn default_weight() -> f64 {
    70.0
}

fn default_diet_type() -> String {
    "mediterranean".to_string()
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: default_age(),
            gender: Gender::default(),
            height_cm: default_height(),
            weight_kg: default_weight(),
            activity_level: ActivityLevel::default(),
            goal: Goal::default(),
            diet_type: default_diet_type(),
        }
    }
}

/// Range checks applied when a profile is saved. Nothing is clamped after
/// that point.
pub mod validation {
    use super::UserProfile;
    use crate::error::{Error, Result};

    pub const AGE_MIN: u32 = 10;
    pub const AGE_MAX: u32 = 100;
    pub const HEIGHT_MIN_CM: f64 = 100.0;
    pub const HEIGHT_MAX_CM: f64 = 250.0;
    pub const WEIGHT_MIN_KG: f64 = 30.0;
    pub const WEIGHT_MAX_KG: f64 = 300.0;

    pub fn validate(profile: &UserProfile) -> Result<()> {
        if profile.age < AGE_MIN || profile.age > AGE_MAX {
            return Err(Error::InvalidProfile(format!(
                "age {} out of range {AGE_MIN}-{AGE_MAX}",
                profile.age
            )));
        }
        if profile.height_cm < HEIGHT_MIN_CM || profile.height_cm > HEIGHT_MAX_CM {
            return Err(Error::InvalidProfile(format!(
                "height {} cm out of range {HEIGHT_MIN_CM}-{HEIGHT_MAX_CM}",
                profile.height_cm
            )));
        }
        if profile.weight_kg < WEIGHT_MIN_KG || profile.weight_kg > WEIGHT_MAX_KG {
            return Err(Error::InvalidProfile(format!(
                "weight {} kg out of range {WEIGHT_MIN_KG}-{WEIGHT_MAX_KG}",
                profile.weight_kg
            )));
        }
        Ok(())
    }
}
