//! Time gap geometry for a day's class slots.
//!
//! Finds the idle stretches between same-day classes and the total
//! on-campus span. Both functions sort internally, so callers may pass
//! slots in any order.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::schedule::ClassSlot;

/// An idle stretch between two consecutive classes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleGap {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub duration_minutes: i64,
}

impl ScheduleGap {
    fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        }
    }
}

/// Gaps between consecutive slots, sorted by start time.
///
/// Only strictly positive gaps are reported; overlapping or
/// back-to-back slots yield nothing. Equal start times keep their
/// original relative order (stable sort).
pub fn compute_gaps(slots: &[ClassSlot]) -> Vec<ScheduleGap> {
    let mut sorted: Vec<_> = slots.to_vec();
    sorted.sort_by_key(|s| s.start());

    let mut gaps = Vec::new();
    for pair in sorted.windows(2) {
        if pair[1].start() > pair[0].end() {
            gaps.push(ScheduleGap::new(pair[0].end(), pair[1].start()));
        }
    }
    gaps
}

/// Total on-campus span in minutes: first start to last end.
///
/// Zero for an empty day; a single slot spans its own duration.
pub fn total_span(slots: &[ClassSlot]) -> i64 {
    let mut sorted: Vec<_> = slots.to_vec();
    sorted.sort_by_key(|s| s.start());

    match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => (last.end() - first.start()).num_minutes(),
        _ => 0,
    }
}

/// Largest gap in minutes, 0 when there are no gaps.
pub fn largest_gap_minutes(slots: &[ClassSlot]) -> i64 {
    compute_gaps(slots)
        .iter()
        .map(|g| g.duration_minutes)
        .max()
        .unwrap_or(0)
}
