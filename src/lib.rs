//! Core engine for the NutriSync diet planner.
//!
//! The UI layer is a consumer of this crate; nothing here renders, routes
//! or talks to the network. The pieces:
//!
//! - [`dataset`]: loads the recipe CSV and normalizes heterogeneous
//!   column names into the canonical schema
//! - [`calories`]: fixed 4/4/9 formula plus an optional trained model
//!   with explicit provenance and formula fallback
//! - [`metrics`]: BMI / BMR / TDEE / target calories from a profile
//! - [`recommend`]: conjunctive recipe filtering and macro-vector
//!   similarity recommendations
//! - [`tracker`]: the append-only meal log and per-day aggregation
//! - [`profile_store`]: the single durable profile record

pub mod calories;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod models;
pub mod profile_store;
pub mod recommend;
pub mod tracker;
mod utils;

pub use calories::{estimate, estimate_model, CalorieEstimate, CalorieModel, EstimateSource};
pub use error::{Error, ModelUnavailable, Result};
pub use metrics::{compute_metrics, ProfileMetrics};
pub use models::{
    ActivityLevel, DailyTotals, Gender, Goal, LogEntry, PlanTotals, Recipe, RecipeTable,
    SessionPlan, UserProfile,
};
pub use profile_store::ProfileStore;
pub use recommend::{filter_recipes, recommend_similar, MealQuery, ScoredRecipe};
pub use tracker::{aggregate_daily, summarize, LogStore, TrackerSummary};
