//! Selection scoring algorithm.
//!
//! One function per scoring factor, combined by [`selection_score`].
//! The weights default to the tuned values but live in a struct so
//! callers can rebalance without touching the algorithm.

use serde::{Deserialize, Serialize};

use crate::gaps;
use crate::schedule::{ClassSlot, UserPreferences};

/// Weights for the selection score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SelectorWeights {
    /// Points per selected class
    pub per_class: f64,
    /// Extra points per selected must-attend class
    pub must_attend_bonus: f64,
    /// Penalty when the largest gap exceeds the preference
    pub long_gap_penalty: f64,
    /// Penalty when the selection is below the minimum classes per day
    pub sparse_day_penalty: f64,
    /// Bonus per selected priority course
    pub priority_bonus: f64,
}

impl Default for SelectorWeights {
    fn default() -> Self {
        Self {
            per_class: 10.0,
            must_attend_bonus: 20.0,
            long_gap_penalty: 50.0,
            sparse_day_penalty: 30.0,
            priority_bonus: 5.0,
        }
    }
}

/// Base score: points per class plus the must-attend bonus.
pub fn class_count_score(
    selection: &[ClassSlot],
    must_ids: &[String],
    weights: &SelectorWeights,
) -> f64 {
    let must_count = selection
        .iter()
        .filter(|s| must_ids.iter().any(|id| id == s.course_id()))
        .count();

    weights.per_class * selection.len() as f64
        + weights.must_attend_bonus * must_count as f64
}

/// Gap penalty: one point per hour of idle time, plus a flat penalty
/// when the largest gap exceeds the user's tolerance.
pub fn gap_penalty(
    selection: &[ClassSlot],
    prefs: &UserPreferences,
    weights: &SelectorWeights,
) -> f64 {
    let gap_list = gaps::compute_gaps(selection);
    let total_minutes: i64 = gap_list.iter().map(|g| g.duration_minutes).sum();
    let max_minutes = gap_list.iter().map(|g| g.duration_minutes).max().unwrap_or(0);

    let mut penalty = total_minutes as f64 / 60.0;
    if max_minutes > prefs.max_gap_minutes {
        penalty += weights.long_gap_penalty;
    }
    penalty
}

/// Flat penalty when the selection is too small to justify the trip.
pub fn sparse_day_penalty(
    selection: &[ClassSlot],
    prefs: &UserPreferences,
    weights: &SelectorWeights,
) -> f64 {
    if selection.len() < prefs.minimum_classes_per_day {
        weights.sparse_day_penalty
    } else {
        0.0
    }
}

/// Bonus per selected class whose course is on the priority list.
pub fn priority_bonus(
    selection: &[ClassSlot],
    prefs: &UserPreferences,
    weights: &SelectorWeights,
) -> f64 {
    let count = selection
        .iter()
        .filter(|s| prefs.priority_courses.iter().any(|id| id == s.course_id()))
        .count();
    weights.priority_bonus * count as f64
}

/// Combined score for a candidate selection.
pub fn selection_score(
    selection: &[ClassSlot],
    must_ids: &[String],
    prefs: &UserPreferences,
    weights: &SelectorWeights,
) -> f64 {
    class_count_score(selection, must_ids, weights)
        - gap_penalty(selection, prefs, weights)
        - sparse_day_penalty(selection, prefs, weights)
        + priority_bonus(selection, prefs, weights)
}
