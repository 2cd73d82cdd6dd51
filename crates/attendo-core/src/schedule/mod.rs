//! Schedule types for courses, class slots, overrides, and preferences.
//!
//! Everything in this module is plain data supplied by the caller from
//! whatever storage it owns. Invariants are checked when values are
//! constructed; the decision algorithms downstream assume valid data.

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ValidationError;

/// A course with its attendance counters.
///
/// Counters only ever grow: a course is appended-to as the term
/// progresses, never deleted. `record_outcome` is the only mutation
/// path, so the invariant `attended <= scheduled - cancelled` holds for
/// the lifetime of the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    id: String,
    name: String,
    required_percentage: f64,
    total_scheduled: u32,
    attended: u32,
    cancelled: u32,
}

impl Course {
    /// Create a course, rejecting counter or percentage violations.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        required_percentage: f64,
        total_scheduled: u32,
        attended: u32,
        cancelled: u32,
    ) -> Result<Self, ValidationError> {
        let course = Self {
            id: id.into(),
            name: name.into(),
            required_percentage,
            total_scheduled,
            attended,
            cancelled,
        };
        course.validate()?;
        Ok(course)
    }

    /// Check the counter and percentage invariants.
    ///
    /// Called by `new`; also used by stores that deserialize courses
    /// from a snapshot and need to reject bad data at the boundary.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=100.0).contains(&self.required_percentage) {
            return Err(ValidationError::PercentageOutOfRange {
                course_id: self.id.clone(),
                value: self.required_percentage,
            });
        }
        if self.cancelled > self.total_scheduled {
            return Err(ValidationError::CancelledExceedsScheduled {
                course_id: self.id.clone(),
                cancelled: self.cancelled,
                scheduled: self.total_scheduled,
            });
        }
        let held = self.total_scheduled - self.cancelled;
        if self.attended > held {
            return Err(ValidationError::AttendedExceedsHeld {
                course_id: self.id.clone(),
                attended: self.attended,
                held,
            });
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn required_percentage(&self) -> f64 {
        self.required_percentage
    }

    pub fn total_scheduled(&self) -> u32 {
        self.total_scheduled
    }

    pub fn attended(&self) -> u32 {
        self.attended
    }

    pub fn cancelled(&self) -> u32 {
        self.cancelled
    }

    /// Classes that actually took place so far.
    pub fn held_classes(&self) -> u32 {
        self.total_scheduled - self.cancelled
    }

    /// Append one class outcome to the counters.
    ///
    /// A cancelled class never counts toward the denominator, so the
    /// `attended` flag is ignored when `cancelled` is set.
    pub fn record_outcome(&mut self, attended: bool, cancelled: bool) {
        self.total_scheduled += 1;
        if cancelled {
            self.cancelled += 1;
        } else if attended {
            self.attended += 1;
        }
    }
}

/// A single time-boxed class on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSlot {
    course_id: String,
    start: NaiveTime,
    end: NaiveTime,
    location: Option<String>,
}

impl ClassSlot {
    /// Create a slot, rejecting `end < start`.
    pub fn new(
        course_id: impl Into<String>,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvalidTimeRange { start, end });
        }
        Ok(Self {
            course_id: course_id.into(),
            start,
            end,
            location: None,
        })
    }

    /// Attach a location.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Reject a deserialized slot with `end < start`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.end < self.start {
            return Err(ValidationError::InvalidTimeRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// A date-specific replacement of the weekly template.
///
/// An override replaces the template for its date wholesale; an empty
/// slot list means a holiday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOverride {
    pub date: NaiveDate,
    pub slots: Vec<ClassSlot>,
    pub reason: Option<String>,
}

/// One recorded attendance outcome for a (date, course) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    pub course_id: String,
    pub attended: bool,
    pub cancelled: bool,
    pub reason: Option<String>,
}

/// Insert a record, superseding any prior record for the same
/// (date, course) pair.
///
/// Callers that persist decisions use this to keep at most one record
/// per pair; the core itself never writes attendance.
pub fn upsert_record(records: &mut Vec<AttendanceRecord>, record: AttendanceRecord) {
    if let Some(existing) = records
        .iter_mut()
        .find(|r| r.date == record.date && r.course_id == record.course_id)
    {
        *existing = record;
    } else {
        records.push(record);
    }
}

/// User preferences, an immutable snapshot per decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Maximum tolerable gap between consecutive attended classes (minutes)
    pub max_gap_minutes: i64,
    /// Course ids that get a scoring bonus, in priority order
    pub priority_courses: Vec<String>,
    /// Minimum classes that make a campus trip worthwhile
    pub minimum_classes_per_day: usize,
    /// Prefer fewer campus trips over attending everything
    pub minimize_trips: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            max_gap_minutes: 120,
            priority_courses: Vec::new(),
            minimum_classes_per_day: 2,
            minimize_trips: false,
        }
    }
}

/// Weekly recurring schedule keyed by weekday name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    /// Lowercase weekday name ("monday" .. "sunday") to slots
    pub days: BTreeMap<String, Vec<ClassSlot>>,
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the slots for one weekday.
    pub fn set_day(&mut self, weekday: Weekday, slots: Vec<ClassSlot>) {
        self.days.insert(weekday_key(weekday).to_string(), slots);
    }

    /// Slots for a weekday; empty when the day has no template entry.
    pub fn slots_for(&self, weekday: Weekday) -> Vec<ClassSlot> {
        self.days
            .get(weekday_key(weekday))
            .cloned()
            .unwrap_or_default()
    }
}

/// Canonical key for a weekday.
pub fn weekday_key(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}
