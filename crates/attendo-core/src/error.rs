//! Core error types for attendo-core.
//!
//! Data-integrity defects are rejected here, at the boundary where data
//! enters the core; the decision algorithms themselves never mask or
//! repair bad input.

use chrono::NaiveTime;
use thiserror::Error;

/// Core error type for attendo-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors raised while constructing domain values
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A class slot references a course the roster does not contain
    #[error("Unknown course '{course_id}' referenced by the schedule")]
    UnknownCourse { course_id: String },

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A class slot where the end time precedes the start time
    #[error("Invalid time range: end ({end}) must not precede start ({start})")]
    InvalidTimeRange { start: NaiveTime, end: NaiveTime },

    /// Attendance counter above the number of classes actually held
    #[error(
        "Course '{course_id}': attended ({attended}) exceeds held classes ({held})"
    )]
    AttendedExceedsHeld {
        course_id: String,
        attended: u32,
        held: u32,
    },

    /// More cancellations than scheduled classes
    #[error(
        "Course '{course_id}': cancelled ({cancelled}) exceeds scheduled ({scheduled})"
    )]
    CancelledExceedsScheduled {
        course_id: String,
        cancelled: u32,
        scheduled: u32,
    },

    /// Required attendance percentage outside [0, 100]
    #[error("Course '{course_id}': required percentage {value} outside [0, 100]")]
    PercentageOutOfRange { course_id: String, value: f64 },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
