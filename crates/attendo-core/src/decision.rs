//! Go/no-go decision engine for a calendar date.
//!
//! Each call walks a fixed sequence: resolve the day's schedule
//! (date-specific overrides replace the weekly template wholesale),
//! classify which classes must be attended, run the greedy selector
//! over the rest, decide go/no-go, and assemble a reasoning trail with
//! a derived confidence score. The engine holds nothing but a
//! read-only store reference; every call gets its own snapshot of the
//! preferences, so repeated and concurrent invocations are safe.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::attendance::{AttendanceTracker, TrackerConfig};
use crate::error::{CoreError, Result};
use crate::gaps::{self, ScheduleGap};
use crate::schedule::{ClassSlot, Course, UserPreferences};
use crate::selector::{DaySelector, SelectorWeights};
use crate::store::ScheduleStore;

/// Final verdict for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayVerdict {
    /// Nothing scheduled; staying home is trivially right
    NoClasses,
    /// Worth going to campus
    Go,
    /// Scheduled classes exist but none are worth the trip
    Skip,
}

/// Attend-vs-skip effect on one course's percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttendanceImpact {
    pub current_percentage: f64,
    pub if_attended: f64,
    pub if_skipped: f64,
    /// Attendance necessity marks this course must-attend today
    pub required: bool,
}

/// Full analysis of one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAnalysis {
    pub date: NaiveDate,
    /// Resolved schedule for the date, sorted by start time
    pub scheduled: Vec<ClassSlot>,
    pub verdict: DayVerdict,
    /// Course ids of the recommended selection, in time order
    pub selected_courses: Vec<String>,
    /// Human-readable justification trail, in decision order
    pub reasoning: Vec<String>,
    /// Gaps within the recommended selection
    pub gaps: Vec<ScheduleGap>,
    /// Per-course attend-vs-skip impact
    pub impact: BTreeMap<String, AttendanceImpact>,
    /// Derived confidence, 0-100
    pub confidence: u8,
}

impl DayAnalysis {
    pub fn should_go(&self) -> bool {
        self.verdict == DayVerdict::Go
    }
}

/// Scalar convenience result for "decide for today".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickDecision {
    pub should_go: bool,
    pub confidence: u8,
    pub summary: String,
}

/// Risk band for a simulated post-decision standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StandingBand {
    /// Below the required percentage
    Critical,
    /// Within five points of the bar
    Warning,
    Safe,
}

/// Hypothetical standing of one course after a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedStanding {
    pub course_id: String,
    pub projected_percentage: f64,
    pub band: StandingBand,
}

/// Engine tuning knobs.
///
/// The travel budget is deliberately caller-supplied; the engine makes
/// no assumption about how long the commute takes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Round-trip travel budget in minutes, used for efficiency remarks
    pub travel_minutes: i64,
    /// Selected gap length that dents confidence
    pub long_gap_minutes: i64,
    /// Campus-to-travel ratio below which confidence drops
    pub efficiency_low: f64,
    /// Campus-to-travel ratio above which confidence rises
    pub efficiency_high: f64,
    pub tracker: TrackerConfig,
    pub weights: SelectorWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            travel_minutes: 240,
            long_gap_minutes: 180,
            efficiency_low: 0.5,
            efficiency_high: 1.5,
            tracker: TrackerConfig::default(),
            weights: SelectorWeights::default(),
        }
    }
}

/// Orchestrates the tracker and selector over a schedule store.
pub struct DecisionEngine<'a, S: ScheduleStore> {
    store: &'a S,
    config: EngineConfig,
    tracker: AttendanceTracker,
    selector: DaySelector,
}

impl<'a, S: ScheduleStore> DecisionEngine<'a, S> {
    /// Create an engine over a read-only store with default tuning.
    pub fn new(store: &'a S) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    /// Create with custom tuning.
    pub fn with_config(store: &'a S, config: EngineConfig) -> Self {
        Self {
            store,
            config,
            tracker: AttendanceTracker::with_config(config.tracker),
            selector: DaySelector::with_weights(config.weights),
        }
    }

    /// Analyze one date and produce the full decision record.
    pub fn analyze(&self, date: NaiveDate, prefs: &UserPreferences) -> Result<DayAnalysis> {
        let (scheduled, override_reason) = self.resolve_schedule(date);

        if scheduled.is_empty() {
            let mut reasoning = vec![format!("no classes scheduled on {date}")];
            if let Some(reason) = override_reason {
                reasoning.push(format!("schedule override: {reason}"));
            }
            return Ok(DayAnalysis {
                date,
                scheduled,
                verdict: DayVerdict::NoClasses,
                selected_courses: Vec::new(),
                reasoning,
                gaps: Vec::new(),
                impact: BTreeMap::new(),
                confidence: 100,
            });
        }

        // Classify each slot by attendance necessity.
        let mut must_attend = Vec::new();
        let mut optional = Vec::new();
        let mut impact = BTreeMap::new();
        let mut critical = Vec::new();
        let mut unrecoverable = Vec::new();

        for slot in &scheduled {
            let course = self.lookup(slot.course_id())?;
            let status = self.tracker.status(&course);
            let required = status.current_percentage < course.required_percentage()
                || status.classes_skippable == 0
                || status.at_risk;

            impact
                .entry(course.id().to_string())
                .or_insert_with(|| impact_for(&course, required));

            if required {
                if !critical.iter().any(|id| id == course.id()) {
                    critical.push(course.id().to_string());
                }
                must_attend.push(slot.clone());
            } else {
                optional.push(slot.clone());
            }

            if let Some(remaining) = self.store.remaining_classes_in_term(course.id()) {
                if !self.tracker.is_recoverable(&course, remaining)
                    && !unrecoverable.iter().any(|id| id == course.id())
                {
                    unrecoverable.push(course.id().to_string());
                }
            }
        }

        let selection = self.selector.select(&must_attend, &optional, prefs);
        let violations = self
            .selector
            .violates_preferences(&selection.selected, prefs);

        let verdict = if !must_attend.is_empty() {
            DayVerdict::Go
        } else if violations.any() {
            DayVerdict::Skip
        } else {
            DayVerdict::Go
        };

        // Assemble the reasoning trail.
        let mut reasoning = Vec::new();
        match verdict {
            DayVerdict::Go if !must_attend.is_empty() => reasoning.push(format!(
                "go: {} class(es) cannot be skipped today",
                must_attend.len()
            )),
            DayVerdict::Go => reasoning.push(format!(
                "go: a selection of {} class(es) is worth the trip",
                selection.selected.len()
            )),
            DayVerdict::Skip => {
                let mut line = "skip: no class requires attendance".to_string();
                if let Some(gap) = violations.max_gap_exceeded {
                    line.push_str(&format!(", largest gap {gap} min exceeds tolerance"));
                }
                if let Some(count) = violations.below_minimum {
                    line.push_str(&format!(
                        ", only {count} class(es) worth attending"
                    ));
                }
                reasoning.push(line);
            }
            DayVerdict::NoClasses => unreachable!("handled above"),
        }

        if verdict == DayVerdict::Go && selection.selected.is_empty() {
            // Inconsistent state: reported, not corrected.
            reasoning.push("warning: going, but the optimizer selected nothing".to_string());
        }
        if !critical.is_empty() {
            reasoning.push(format!("critical courses: {}", critical.join(", ")));
        }
        for course_id in &unrecoverable {
            reasoning.push(format!(
                "{course_id}: requirement no longer attainable this term"
            ));
        }
        reasoning.extend(selection.reasoning.iter().cloned());

        let campus_minutes = gaps::total_span(&selection.selected);
        reasoning.push(format!(
            "efficiency: {campus_minutes} min on campus against a {} min travel budget",
            self.config.travel_minutes
        ));

        let confidence = self.confidence(verdict, must_attend.len(), &selection.selected);

        Ok(DayAnalysis {
            date,
            gaps: gaps::compute_gaps(&selection.selected),
            selected_courses: selection
                .selected
                .iter()
                .map(|s| s.course_id().to_string())
                .collect(),
            scheduled,
            verdict,
            reasoning,
            impact,
            confidence,
        })
    }

    /// Scalar go/no-go convenience wrapper.
    pub fn decide(&self, date: NaiveDate, prefs: &UserPreferences) -> Result<QuickDecision> {
        let analysis = self.analyze(date, prefs)?;
        Ok(QuickDecision {
            should_go: analysis.should_go(),
            confidence: analysis.confidence,
            summary: analysis
                .reasoning
                .first()
                .cloned()
                .unwrap_or_default(),
        })
    }

    /// Project each scheduled course's standing after a hypothetical
    /// decision to attend the given courses. Mutates nothing.
    pub fn simulate(
        &self,
        date: NaiveDate,
        attended_course_ids: &[String],
    ) -> Result<Vec<SimulatedStanding>> {
        let (scheduled, _) = self.resolve_schedule(date);

        let mut seen: Vec<String> = Vec::new();
        let mut standings = Vec::new();

        for slot in &scheduled {
            if seen.iter().any(|id| id == slot.course_id()) {
                continue;
            }
            seen.push(slot.course_id().to_string());

            let course = self.lookup(slot.course_id())?;
            let held = course.held_classes() + 1;
            let attended = course.attended()
                + u32::from(attended_course_ids.iter().any(|id| id == course.id()));
            let projected = f64::from(attended) / f64::from(held) * 100.0;

            let band = if projected < course.required_percentage() {
                StandingBand::Critical
            } else if projected < course.required_percentage() + 5.0 {
                StandingBand::Warning
            } else {
                StandingBand::Safe
            };

            standings.push(SimulatedStanding {
                course_id: course.id().to_string(),
                projected_percentage: projected,
                band,
            });
        }

        Ok(standings)
    }

    /// Resolve the schedule for a date: an override (possibly empty)
    /// replaces the weekly template entirely.
    fn resolve_schedule(&self, date: NaiveDate) -> (Vec<ClassSlot>, Option<String>) {
        let (mut slots, reason) = match self.store.override_for(date) {
            Some(override_entry) => (override_entry.slots, override_entry.reason),
            None => (self.store.weekly_slots(date.weekday()), None),
        };
        slots.sort_by_key(|s| s.start());
        (slots, reason)
    }

    fn lookup(&self, course_id: &str) -> Result<Course> {
        self.store
            .course(course_id)
            .ok_or_else(|| CoreError::UnknownCourse {
                course_id: course_id.to_string(),
            })
    }

    /// Derived confidence in the verdict.
    fn confidence(&self, verdict: DayVerdict, must_count: usize, selected: &[ClassSlot]) -> u8 {
        if verdict == DayVerdict::Go && selected.is_empty() {
            // Inconsistent decision state: pinned low.
            return 20;
        }

        let mut score = 70.0;
        score += 10.0 * must_count as f64;

        if gaps::largest_gap_minutes(selected) > self.config.long_gap_minutes {
            score -= 15.0;
        }

        if self.config.travel_minutes > 0 {
            let ratio =
                gaps::total_span(selected) as f64 / self.config.travel_minutes as f64;
            if ratio < self.config.efficiency_low {
                score -= 20.0;
            } else if ratio > self.config.efficiency_high {
                score += 10.0;
            }
        }

        score.clamp(0.0, 100.0) as u8
    }
}

/// Attend-vs-skip percentages for one course, over one more held class.
fn impact_for(course: &Course, required: bool) -> AttendanceImpact {
    let held = course.held_classes();
    let attended = course.attended();

    let current_percentage = if held == 0 {
        100.0
    } else {
        f64::from(attended) / f64::from(held) * 100.0
    };
    let next_held = f64::from(held + 1);

    AttendanceImpact {
        current_percentage,
        if_attended: f64::from(attended + 1) / next_held * 100.0,
        if_skipped: f64::from(attended) / next_held * 100.0,
        required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ScheduleOverride;
    use crate::store::MemoryScheduleStore;
    use chrono::{NaiveTime, Weekday};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn slot(course: &str, start: (u32, u32), end: (u32, u32)) -> ClassSlot {
        ClassSlot::new(course, t(start.0, start.1), t(end.0, end.1)).unwrap()
    }

    // 2026-03-02 is a Monday.
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn base_store() -> MemoryScheduleStore {
        let mut store = MemoryScheduleStore::new();
        store
            .courses
            .push(Course::new("cs101", "Algorithms", 75.0, 40, 28, 0).unwrap());
        store
            .courses
            .push(Course::new("ma201", "Linear Algebra", 75.0, 40, 36, 4).unwrap());
        store.weekly.set_day(
            Weekday::Mon,
            vec![
                slot("cs101", (9, 0), (10, 30)),
                slot("ma201", (11, 0), (12, 30)),
            ],
        );
        store
    }

    #[test]
    fn below_bar_course_forces_go() {
        let store = base_store();
        let engine = DecisionEngine::new(&store);
        let analysis = engine
            .analyze(monday(), &UserPreferences::default())
            .unwrap();

        assert_eq!(analysis.verdict, DayVerdict::Go);
        assert!(analysis.selected_courses.contains(&"cs101".to_string()));
        assert!(analysis.impact["cs101"].required);
        assert!(analysis
            .reasoning
            .iter()
            .any(|line| line.contains("critical courses: cs101")));
    }

    #[test]
    fn override_replaces_template_wholesale() {
        let mut store = base_store();
        store.overrides.push(ScheduleOverride {
            date: monday(),
            slots: vec![slot("ma201", (14, 0), (15, 30))],
            reason: Some("makeup class".to_string()),
        });

        let engine = DecisionEngine::new(&store);
        let analysis = engine
            .analyze(monday(), &UserPreferences::default())
            .unwrap();

        // The weekly cs101 slot must not leak through.
        assert_eq!(analysis.scheduled.len(), 1);
        assert_eq!(analysis.scheduled[0].course_id(), "ma201");
    }

    #[test]
    fn unknown_course_is_rejected() {
        let mut store = base_store();
        store.weekly.set_day(Weekday::Tue, vec![slot("ghost", (9, 0), (10, 0))]);

        let engine = DecisionEngine::new(&store);
        let err = engine.analyze(
            NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
            &UserPreferences::default(),
        );
        assert!(matches!(err, Err(CoreError::UnknownCourse { .. })));
    }

    #[test]
    fn simulate_classifies_bands() {
        let store = base_store();
        let engine = DecisionEngine::new(&store);

        // Attend both: cs101 goes to 29/41 (70.7%, still critical),
        // ma201 to 37/37 (safe).
        let standings = engine
            .simulate(monday(), &["cs101".to_string(), "ma201".to_string()])
            .unwrap();
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].course_id, "cs101");
        assert_eq!(standings[0].band, StandingBand::Critical);
        assert_eq!(standings[1].band, StandingBand::Safe);

        // Skipping ma201 leaves 36/37 (97.3%, safe).
        let standings = engine.simulate(monday(), &[]).unwrap();
        assert_eq!(standings[1].band, StandingBand::Safe);
    }

    #[test]
    fn simulate_does_not_mutate_store() {
        let store = base_store();
        let engine = DecisionEngine::new(&store);
        engine
            .simulate(monday(), &["cs101".to_string()])
            .unwrap();
        assert_eq!(store.course("cs101").unwrap().attended(), 28);
    }

    #[test]
    fn unrecoverable_course_is_reported() {
        let mut store = base_store();
        // 28 + 5 = 33 of 45 is 73.3%: unattainable at 75%.
        store.remaining.insert("cs101".to_string(), 5);

        let engine = DecisionEngine::new(&store);
        let analysis = engine
            .analyze(monday(), &UserPreferences::default())
            .unwrap();
        assert!(analysis
            .reasoning
            .iter()
            .any(|line| line.contains("cs101: requirement no longer attainable")));
    }

    #[test]
    fn confidence_rises_with_must_attend_classes() {
        let store = base_store();
        let engine = DecisionEngine::new(&store);
        let analysis = engine
            .analyze(monday(), &UserPreferences::default())
            .unwrap();

        // One must-attend (+10 on 70), span 210 of 240 travel budget
        // (ratio 0.875, no adjustment), no long gap.
        assert_eq!(analysis.confidence, 80);
    }
}
