use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One meal-consumption event. Macros are caller-supplied and independent
/// of any recipe the name might match. The log is append-only: entries are
/// never edited or deleted in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub user: String,
    pub date: NaiveDate,
    pub recipe: String,
    #[serde(rename = "protein")]
    pub protein_g: f64,
    #[serde(rename = "carbs")]
    pub carbs_g: f64,
    #[serde(rename = "fat")]
    pub fat_g: f64,
    /// Timestamp of the write, not of consumption
    pub saved_at: DateTime<Utc>,
}

/// Per-day macro sums for one user; calories derived via the fixed formula.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub calories: f64,
}
