//! Append-only meal log backed by a CSV file.
//!
//! The store is a shared single-writer resource: appends go through one
//! open-or-create call in append mode, so there is no existence-check race
//! and the header is written exactly once. Readers tolerate the file not
//! existing yet.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, Utc};
use log::info;
use serde::Serialize;

use crate::calories;
use crate::error::Result;
use crate::models::{DailyTotals, LogEntry, SessionPlan};

pub struct LogStore {
    path: PathBuf,
}

impl LogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, creating the file (and its header) on first write.
    /// No deduplication: identical entries are legal and expected.
    pub fn append(&self, entry: &LogEntry) -> Result<()> {
        self.append_all(std::slice::from_ref(entry))
    }

    /// Commit a session plan: every item becomes one entry dated at commit
    /// time, not at selection time.
    pub fn append_plan(&self, plan: &SessionPlan, user: &str) -> Result<()> {
        let today = Local::now().date_naive();
        let saved_at = Utc::now();

        let entries: Vec<LogEntry> = plan
            .items()
            .iter()
            .map(|recipe| LogEntry {
                user: user.to_string(),
                date: today,
                recipe: recipe.name.clone(),
                protein_g: recipe.protein_g,
                carbs_g: recipe.carbs_g,
                fat_g: recipe.fat_g,
                saved_at,
            })
            .collect();

        self.append_all(&entries)?;
        if !entries.is_empty() {
            info!("committed {} plan items for {user}", entries.len());
        }
        Ok(())
    }

    fn append_all(&self, entries: &[LogEntry]) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        for entry in entries {
            writer.serialize(entry)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// The full persisted log; an empty vec when the store has never been
    /// written.
    pub fn load_all(&self) -> Result<Vec<LogEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut entries = Vec::new();
        for record in reader.deserialize() {
            entries.push(record?);
        }
        Ok(entries)
    }
}

/// Group one user's entries by calendar date, summing macros. Dates ascend
/// for charting; the UI layer may re-sort for table display.
pub fn aggregate_daily(entries: &[LogEntry], user: &str) -> Vec<DailyTotals> {
    let mut by_date: BTreeMap<NaiveDate, (f64, f64, f64)> = BTreeMap::new();
    for entry in entries.iter().filter(|entry| entry.user == user) {
        let totals = by_date.entry(entry.date).or_default();
        totals.0 += entry.protein_g;
        totals.1 += entry.carbs_g;
        totals.2 += entry.fat_g;
    }

    by_date
        .into_iter()
        .map(|(date, (protein_g, carbs_g, fat_g))| DailyTotals {
            date,
            protein_g,
            carbs_g,
            fat_g,
            calories: calories::estimate(protein_g, carbs_g, fat_g),
        })
        .collect()
}

/// Per-day averages over an aggregated range, for summary tiles.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct TrackerSummary {
    pub days: usize,
    pub avg_calories: f64,
    pub avg_protein_g: f64,
    pub avg_carbs_g: f64,
    pub avg_fat_g: f64,
}

pub fn summarize(daily: &[DailyTotals]) -> Option<TrackerSummary> {
    if daily.is_empty() {
        return None;
    }
    let days = daily.len();
    let count = days as f64;
    Some(TrackerSummary {
        days,
        avg_calories: daily.iter().map(|d| d.calories).sum::<f64>() / count,
        avg_protein_g: daily.iter().map(|d| d.protein_g).sum::<f64>() / count,
        avg_carbs_g: daily.iter().map(|d| d.carbs_g).sum::<f64>() / count,
        avg_fat_g: daily.iter().map(|d| d.fat_g).sum::<f64>() / count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(user: &str, date: &str, recipe: &str, p: f64, c: f64, f: f64) -> LogEntry {
        LogEntry {
            user: user.to_string(),
            date: date.parse().unwrap(),
            recipe: recipe.to_string(),
            protein_g: p,
            carbs_g: c,
            fat_g: f,
            saved_at: Utc.with_ymd_and_hms(2025, 11, 2, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn load_all_on_missing_store_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::new(dir.path().join("user_logs.csv"));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn append_round_trips_and_header_is_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::new(dir.path().join("user_logs.csv"));

        let first = entry("ana", "2025-11-02", "Omelette", 20.0, 2.0, 15.0);
        store.append(&first).unwrap();
        store.append(&first).unwrap(); // duplicates are legal

        let raw = fs::read_to_string(store.path()).unwrap();
        let header_count = raw
            .lines()
            .filter(|line| line.starts_with("user,date,recipe,protein,carbs,fat,saved_at"))
            .count();
        assert_eq!(header_count, 1);

        let entries = store.load_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], first);
        assert_eq!(entries[1], first);
    }

    #[test]
    fn aggregation_sums_per_user_per_day_with_formula_calories() {
        let entries = vec![
            entry("ana", "2025-11-02", "Omelette", 20.0, 2.0, 15.0),
            entry("ana", "2025-11-02", "Steak", 40.0, 0.0, 25.0),
            entry("ana", "2025-11-01", "Salad", 5.0, 10.0, 3.0),
            entry("bob", "2025-11-02", "Pizza", 25.0, 80.0, 30.0),
        ];

        let daily = aggregate_daily(&entries, "ana");
        assert_eq!(daily.len(), 2);

        // ascending dates
        assert_eq!(daily[0].date, "2025-11-01".parse::<NaiveDate>().unwrap());
        assert_eq!(daily[1].date, "2025-11-02".parse::<NaiveDate>().unwrap());

        assert_eq!(daily[1].protein_g, 60.0);
        assert_eq!(daily[1].carbs_g, 2.0);
        assert_eq!(daily[1].fat_g, 40.0);
        assert_eq!(
            daily[1].calories,
            4.0 * 60.0 + 4.0 * 2.0 + 9.0 * 40.0
        );
    }

    #[test]
    fn aggregation_for_unknown_user_is_empty() {
        let entries = vec![entry("ana", "2025-11-02", "Omelette", 20.0, 2.0, 15.0)];
        assert!(aggregate_daily(&entries, "nobody").is_empty());
    }

    #[test]
    fn summary_averages_the_daily_rows() {
        let entries = vec![
            entry("ana", "2025-11-01", "Salad", 10.0, 20.0, 5.0),
            entry("ana", "2025-11-02", "Steak", 30.0, 0.0, 15.0),
        ];
        let daily = aggregate_daily(&entries, "ana");
        let summary = summarize(&daily).unwrap();

        assert_eq!(summary.days, 2);
        assert_eq!(summary.avg_protein_g, 20.0);
        assert_eq!(summary.avg_carbs_g, 10.0);
        assert_eq!(summary.avg_fat_g, 10.0);
        assert_eq!(
            summary.avg_calories,
            (daily[0].calories + daily[1].calories) / 2.0
        );

        assert!(summarize(&[]).is_none());
    }
}
