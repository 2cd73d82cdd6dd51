//! Greedy day-schedule optimizer.
//!
//! Given the classes that must be attended and the ones that are
//! optional, builds the best-scoring subset by forward selection:
//! repeatedly add the optional class that improves the score the most,
//! stop when nothing improves it. This is a hill climb, not a global
//! optimum search; ties break by iteration order, which keeps results
//! reproducible for the small daily schedules it runs on.

pub mod scoring;

use serde::{Deserialize, Serialize};

use crate::gaps;
use crate::schedule::{ClassSlot, UserPreferences};

pub use scoring::{selection_score, SelectorWeights};

/// Result of a day's selection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    /// Chosen slots, sorted by start time
    pub selected: Vec<ClassSlot>,
    /// Optional slots that did not make the cut
    pub skipped: Vec<ClassSlot>,
    /// Score of the final selection
    pub score: f64,
    /// One line per decision the optimizer made
    pub reasoning: Vec<String>,
}

/// Preference constraints a selection fails to meet.
///
/// Reported independently of the score so callers can decide whether
/// to override the greedy result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceViolations {
    /// Largest gap in minutes, when it exceeds the tolerance
    pub max_gap_exceeded: Option<i64>,
    /// Selection size, when below the minimum classes per day
    pub below_minimum: Option<usize>,
}

impl PreferenceViolations {
    pub fn any(&self) -> bool {
        self.max_gap_exceeded.is_some() || self.below_minimum.is_some()
    }
}

/// Greedy forward selector over one day's classes.
pub struct DaySelector {
    weights: SelectorWeights,
}

impl DaySelector {
    /// Create a selector with the default weights.
    pub fn new() -> Self {
        Self {
            weights: SelectorWeights::default(),
        }
    }

    /// Create with custom weights.
    pub fn with_weights(weights: SelectorWeights) -> Self {
        Self { weights }
    }

    /// Build the recommended subset for one day.
    ///
    /// The must-attend slots are always included and never removed;
    /// optional slots are added one at a time while doing so strictly
    /// improves the score.
    pub fn select(
        &self,
        must_attend: &[ClassSlot],
        optional: &[ClassSlot],
        prefs: &UserPreferences,
    ) -> SelectionResult {
        let must_ids: Vec<String> =
            must_attend.iter().map(|s| s.course_id().to_string()).collect();

        let mut selection: Vec<ClassSlot> = must_attend.to_vec();
        let mut candidates: Vec<ClassSlot> = optional.to_vec();
        let mut reasoning = vec![format!(
            "{} mandatory class(es) locked in",
            must_attend.len()
        )];

        let mut current = selection_score(&selection, &must_ids, prefs, &self.weights);

        loop {
            let mut best: Option<(usize, f64)> = None;
            for (index, candidate) in candidates.iter().enumerate() {
                let mut trial = selection.clone();
                trial.push(candidate.clone());
                let score = selection_score(&trial, &must_ids, prefs, &self.weights);
                // Strict comparison keeps the first candidate on ties.
                if score > best.map_or(current, |(_, s)| s) {
                    best = Some((index, score));
                }
            }

            let Some((index, score)) = best else { break };
            let added = candidates.remove(index);
            reasoning.push(format!(
                "added {} ({:.1} -> {:.1} points)",
                added.course_id(),
                current,
                score
            ));
            selection.push(added);
            current = score;
        }

        if !candidates.is_empty() {
            let skipped_ids: Vec<&str> =
                candidates.iter().map(|s| s.course_id()).collect();
            reasoning.push(format!("skipped: {}", skipped_ids.join(", ")));
        }

        selection.sort_by_key(|s| s.start());

        SelectionResult {
            selected: selection,
            skipped: candidates,
            score: current,
            reasoning,
        }
    }

    /// Check a selection against the user's hard preferences.
    pub fn violates_preferences(
        &self,
        selection: &[ClassSlot],
        prefs: &UserPreferences,
    ) -> PreferenceViolations {
        let mut violations = PreferenceViolations::default();

        let max_gap = gaps::largest_gap_minutes(selection);
        if max_gap > prefs.max_gap_minutes {
            violations.max_gap_exceeded = Some(max_gap);
        }
        if selection.len() < prefs.minimum_classes_per_day {
            violations.below_minimum = Some(selection.len());
        }
        violations
    }
}

impl Default for DaySelector {
    fn default() -> Self {
        Self::new()
    }
}
