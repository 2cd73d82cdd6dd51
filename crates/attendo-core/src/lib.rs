//! # Attendo Core Library
//!
//! Core business logic for Attendo, a "must I attend class today?"
//! assistant for students under a mandatory attendance rule (typically
//! 75%). The CLI binary is a thin layer over this library.
//!
//! ## Architecture
//!
//! - **Attendance**: pure arithmetic over course counters -- current
//!   ratio, classes still needed, projections over the rest of the term
//! - **Gaps**: idle-time geometry for a day's class slots
//! - **Selector**: greedy optimizer choosing which optional classes to
//!   attend alongside the mandatory ones
//! - **Decision**: per-date orchestration producing a go/no-go verdict
//!   with a reasoning trail and confidence score
//!
//! The core is stateless and performs no I/O: callers materialize the
//! roster, weekly schedule, overrides, and preferences behind a
//! [`ScheduleStore`] and persist any attendance updates themselves.
//!
//! ## Key Components
//!
//! - [`AttendanceTracker`]: ratio tracking and term projection
//! - [`DaySelector`]: greedy day-schedule optimizer
//! - [`DecisionEngine`]: go/no-go decisions per calendar date
//! - [`ScheduleStore`]: read-only collaborator seam for persisted data

pub mod attendance;
pub mod decision;
pub mod error;
pub mod gaps;
pub mod schedule;
pub mod selector;
pub mod store;

pub use attendance::{AttendanceStatus, AttendanceTracker, FutureProjection, TrackerConfig};
pub use decision::{
    AttendanceImpact, DayAnalysis, DayVerdict, DecisionEngine, EngineConfig, QuickDecision,
    SimulatedStanding, StandingBand,
};
pub use error::{CoreError, Result, ValidationError};
pub use gaps::{compute_gaps, total_span, ScheduleGap};
pub use schedule::{
    upsert_record, AttendanceRecord, ClassSlot, Course, ScheduleOverride, UserPreferences,
    WeeklySchedule,
};
pub use selector::{DaySelector, PreferenceViolations, SelectionResult, SelectorWeights};
pub use store::{MemoryScheduleStore, ScheduleStore};
