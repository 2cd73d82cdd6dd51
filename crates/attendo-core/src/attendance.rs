//! Attendance ratio tracking and projection.
//!
//! Pure arithmetic over a [`Course`] and a caller-supplied count of
//! classes remaining in the term. Nothing here mutates a course or
//! touches storage.

use serde::{Deserialize, Serialize};

use crate::schedule::Course;

/// Thresholds for the tracker heuristics.
///
/// The at-risk ratio mirrors the behavior the rest of the system was
/// tuned against; it is a config field rather than a literal so callers
/// can experiment without a rebuild.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// A course is at risk when classes still needed exceed this
    /// fraction of the not-yet-held scheduled classes.
    pub at_risk_ratio: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self { at_risk_ratio: 0.8 }
    }
}

/// Current standing of a course against its required percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttendanceStatus {
    /// Classes that actually took place (scheduled minus cancelled)
    pub held_classes: u32,
    /// Attended / held, as a percentage; 100 when nothing was held yet
    pub current_percentage: f64,
    /// Classes that must still be attended to reach the requirement
    pub classes_still_needed: u32,
    /// Classes that could be skipped while staying at or above it
    pub classes_skippable: u32,
    /// Requirement is in danger given the classes left on the schedule
    pub at_risk: bool,
}

/// Forward-looking projection over the rest of the term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FutureProjection {
    /// Classes that must be attended out of those remaining
    pub minimum_must_attend: u32,
    /// Classes that may safely be skipped out of those remaining
    pub maximum_can_skip: u32,
    /// minimum_must_attend as a fraction of the remaining classes
    pub must_attend_ratio: f64,
}

/// Computes attendance standings and projections for courses.
pub struct AttendanceTracker {
    config: TrackerConfig,
}

impl AttendanceTracker {
    /// Create a tracker with the default thresholds.
    pub fn new() -> Self {
        Self {
            config: TrackerConfig::default(),
        }
    }

    /// Create with custom thresholds.
    pub fn with_config(config: TrackerConfig) -> Self {
        Self { config }
    }

    /// Current standing of a course.
    pub fn status(&self, course: &Course) -> AttendanceStatus {
        let held = course.held_classes();
        let attended = course.attended();

        let current_percentage = if held == 0 {
            100.0
        } else {
            f64::from(attended) / f64::from(held) * 100.0
        };

        let required_classes = required_count(course.required_percentage(), held);
        let classes_still_needed = required_classes.saturating_sub(attended);
        let classes_skippable = attended.saturating_sub(required_classes);

        // Scheduled classes not yet held.
        let remaining_scheduled = course.total_scheduled() - held;
        let at_risk = f64::from(classes_still_needed)
            > self.config.at_risk_ratio * f64::from(remaining_scheduled);

        AttendanceStatus {
            held_classes: held,
            current_percentage,
            classes_still_needed,
            classes_skippable,
            at_risk,
        }
    }

    /// Project the requirement over the remaining classes of the term.
    pub fn project_future(&self, course: &Course, remaining: u32) -> FutureProjection {
        let total_future = course.held_classes() + remaining;
        let required_future = required_count(course.required_percentage(), total_future);
        let minimum_must_attend = required_future.saturating_sub(course.attended());
        let maximum_can_skip = remaining.saturating_sub(minimum_must_attend);

        let must_attend_ratio = if remaining == 0 {
            0.0
        } else {
            f64::from(minimum_must_attend) / f64::from(remaining)
        };

        FutureProjection {
            minimum_must_attend,
            maximum_can_skip,
            must_attend_ratio,
        }
    }

    /// Whether attending every remaining class would still meet the bar.
    ///
    /// A false result is a reportable condition, not an error: the
    /// requirement is mathematically unattainable this term and callers
    /// surface that to the user.
    pub fn is_recoverable(&self, course: &Course, remaining: u32) -> bool {
        let total_future = course.held_classes() + remaining;
        if total_future == 0 {
            return true;
        }
        let best_case =
            f64::from(course.attended() + remaining) / f64::from(total_future) * 100.0;
        best_case >= course.required_percentage()
    }
}

impl Default for AttendanceTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Classes required to meet `percentage` out of `total`, rounded up.
fn required_count(percentage: f64, total: u32) -> u32 {
    (percentage / 100.0 * f64::from(total)).ceil() as u32
}
