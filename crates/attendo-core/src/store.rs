//! Schedule store collaborator seam.
//!
//! The engine never owns persistence. Whatever the surrounding system
//! stores courses and schedules in, it hands the engine a read-only
//! view through [`ScheduleStore`]; attendance updates flow back through
//! the caller, never through this trait.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::schedule::{ClassSlot, Course, ScheduleOverride, WeeklySchedule};

/// Read-only view of the course roster and schedule.
pub trait ScheduleStore {
    /// Look up one course by id.
    fn course(&self, id: &str) -> Option<Course>;

    /// The full course roster.
    fn courses(&self) -> Vec<Course>;

    /// Weekly template slots for a weekday.
    fn weekly_slots(&self, weekday: Weekday) -> Vec<ClassSlot>;

    /// Date-specific override, when one exists for the exact date.
    fn override_for(&self, date: NaiveDate) -> Option<ScheduleOverride>;

    /// Classes left on a course's term calendar, when the store knows.
    fn remaining_classes_in_term(&self, course_id: &str) -> Option<u32>;
}

/// In-memory store backed by caller-materialized collections.
///
/// Tests and the CLI deserialize one of these from a JSON snapshot;
/// `validate` rejects bad data at that boundary so the engine never
/// sees counter or time-range violations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryScheduleStore {
    pub courses: Vec<Course>,
    pub weekly: WeeklySchedule,
    #[serde(default)]
    pub overrides: Vec<ScheduleOverride>,
    /// Remaining term classes per course id
    #[serde(default)]
    pub remaining: BTreeMap<String, u32>,
}

impl MemoryScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every course and slot in the store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for course in &self.courses {
            course.validate()?;
        }
        for slots in self.weekly.days.values() {
            for slot in slots {
                slot.validate()?;
            }
        }
        for override_entry in &self.overrides {
            for slot in &override_entry.slots {
                slot.validate()?;
            }
        }
        Ok(())
    }
}

impl ScheduleStore for MemoryScheduleStore {
    fn course(&self, id: &str) -> Option<Course> {
        self.courses.iter().find(|c| c.id() == id).cloned()
    }

    fn courses(&self) -> Vec<Course> {
        self.courses.clone()
    }

    fn weekly_slots(&self, weekday: Weekday) -> Vec<ClassSlot> {
        self.weekly.slots_for(weekday)
    }

    fn override_for(&self, date: NaiveDate) -> Option<ScheduleOverride> {
        self.overrides.iter().find(|o| o.date == date).cloned()
    }

    fn remaining_classes_in_term(&self, course_id: &str) -> Option<u32> {
        self.remaining.get(course_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn store() -> MemoryScheduleStore {
        let mut store = MemoryScheduleStore::new();
        store
            .courses
            .push(Course::new("cs101", "Algorithms", 75.0, 40, 30, 0).unwrap());
        store.weekly.set_day(
            Weekday::Mon,
            vec![ClassSlot::new("cs101", t(9, 0), t(10, 30)).unwrap()],
        );
        store.overrides.push(ScheduleOverride {
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            slots: Vec::new(),
            reason: Some("holiday".to_string()),
        });
        store.remaining.insert("cs101".to_string(), 10);
        store
    }

    #[test]
    fn lookups() {
        let store = store();
        assert!(store.course("cs101").is_some());
        assert!(store.course("nope").is_none());
        assert_eq!(store.weekly_slots(Weekday::Mon).len(), 1);
        assert!(store.weekly_slots(Weekday::Tue).is_empty());
        assert_eq!(store.remaining_classes_in_term("cs101"), Some(10));
    }

    #[test]
    fn override_matches_exact_date_only() {
        let store = store();
        let holiday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert!(store.override_for(holiday).is_some());
        assert!(store
            .override_for(holiday.succ_opt().unwrap())
            .is_none());
    }

    #[test]
    fn snapshot_validation_rejects_bad_counters() {
        let json = r#"{
            "courses": [{
                "id": "cs101",
                "name": "Algorithms",
                "required_percentage": 75.0,
                "total_scheduled": 10,
                "attended": 11,
                "cancelled": 0
            }],
            "weekly": { "days": {} }
        }"#;

        let store: MemoryScheduleStore = serde_json::from_str(json).unwrap();
        assert!(store.validate().is_err());
    }
}
