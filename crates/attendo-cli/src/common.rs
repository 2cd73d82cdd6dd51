//! Snapshot loading shared by all commands.
//!
//! The CLI is the caller in the core's contract: it materializes the
//! store from a JSON file, validates it at that boundary, and hands the
//! engine a read-only view.

use std::error::Error;
use std::path::Path;

use attendo_core::{EngineConfig, MemoryScheduleStore, UserPreferences};
use chrono::NaiveDate;
use serde::Deserialize;

fn default_travel_minutes() -> i64 {
    240
}

/// Everything a decision needs, deserialized from one JSON file.
#[derive(Debug, Deserialize)]
pub struct Snapshot {
    #[serde(flatten)]
    pub store: MemoryScheduleStore,
    #[serde(default)]
    pub preferences: UserPreferences,
    /// Round-trip travel budget in minutes
    #[serde(default = "default_travel_minutes")]
    pub travel_minutes: i64,
}

impl Snapshot {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            travel_minutes: self.travel_minutes,
            ..EngineConfig::default()
        }
    }
}

/// Load and validate a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, Box<dyn Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&raw)?;
    snapshot.store.validate()?;
    Ok(snapshot)
}

/// Parse a `YYYY-MM-DD` date, defaulting to today.
pub fn resolve_date(date: Option<String>) -> Result<NaiveDate, Box<dyn Error>> {
    match date {
        Some(raw) => Ok(NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|e| format!("invalid date '{raw}': {e}"))?),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
