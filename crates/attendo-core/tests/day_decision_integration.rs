//! Integration tests for the full decision pipeline.
//!
//! These walk the public API the way the CLI does: build an in-memory
//! store, run the engine for a date, and check the verdict, reasoning
//! trail, and confidence together.

use attendo_core::{
    ClassSlot, Course, DayVerdict, DecisionEngine, MemoryScheduleStore, ScheduleOverride,
    UserPreferences,
};
use chrono::{NaiveDate, NaiveTime, Weekday};

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

fn safe_course(id: &str) -> Course {
    // 36 of 40 held is 90% against a 75% bar, with slack to skip.
    Course::new(id, id.to_uppercase(), 75.0, 40, 36, 0).unwrap()
}

fn prefs() -> UserPreferences {
    UserPreferences {
        max_gap_minutes: 120,
        priority_courses: Vec::new(),
        minimum_classes_per_day: 2,
        minimize_trips: false,
    }
}

#[test]
fn holiday_override_is_a_clean_no() {
    // Scenario: an override with zero classes replaces a normal Monday.
    let mut store = MemoryScheduleStore::new();
    store.courses.push(safe_course("cs101"));
    store
        .weekly
        .set_day(Weekday::Mon, vec![slot("cs101", (9, 0), (10, 30))]);
    store.overrides.push(ScheduleOverride {
        date: monday(),
        slots: Vec::new(),
        reason: Some("institute holiday".to_string()),
    });

    let engine = DecisionEngine::new(&store);
    let analysis = engine.analyze(monday(), &prefs()).unwrap();

    assert_eq!(analysis.verdict, DayVerdict::NoClasses);
    assert!(analysis.scheduled.is_empty());
    assert!(analysis.selected_courses.is_empty());
    assert_eq!(analysis.confidence, 100);
    assert!(analysis
        .reasoning
        .iter()
        .any(|line| line.contains("no classes")));
    assert!(analysis
        .reasoning
        .iter()
        .any(|line| line.contains("institute holiday")));

    let quick = engine.decide(monday(), &prefs()).unwrap();
    assert!(!quick.should_go);
    assert_eq!(quick.confidence, 100);
}

#[test]
fn safe_courses_with_bad_gaps_mean_skip() {
    // Scenario: everything is comfortably above the bar, but the three
    // classes are hours apart, so no selection satisfies the
    // preferences and the day is a skip despite a nonempty schedule.
    let mut store = MemoryScheduleStore::new();
    for id in ["cs101", "ma201", "ph301"] {
        store.courses.push(safe_course(id));
    }
    store.weekly.set_day(
        Weekday::Mon,
        vec![
            slot("cs101", (9, 0), (10, 0)),
            slot("ma201", (13, 0), (14, 0)),
            slot("ph301", (17, 0), (18, 0)),
        ],
    );

    let engine = DecisionEngine::new(&store);
    let analysis = engine.analyze(monday(), &prefs()).unwrap();

    assert_eq!(analysis.verdict, DayVerdict::Skip);
    assert!(!analysis.scheduled.is_empty());
    assert!(analysis.reasoning[0].starts_with("skip:"));
}

#[test]
fn one_critical_course_turns_the_day_into_a_go() {
    // Scenario: one course short on attendance scheduled alongside
    // three safe ones with large gaps. The shortfall forces a go and
    // the reasoning names the course.
    let mut store = MemoryScheduleStore::new();
    store
        .courses
        .push(Course::new("cs101", "Algorithms", 75.0, 40, 28, 0).unwrap());
    for id in ["ma201", "ph301", "ch401"] {
        store.courses.push(safe_course(id));
    }
    store.weekly.set_day(
        Weekday::Mon,
        vec![
            slot("cs101", (9, 0), (10, 0)),
            slot("ma201", (13, 0), (14, 0)),
            slot("ph301", (16, 0), (17, 0)),
            slot("ch401", (18, 0), (19, 0)),
        ],
    );

    let engine = DecisionEngine::new(&store);
    let analysis = engine.analyze(monday(), &prefs()).unwrap();

    assert_eq!(analysis.verdict, DayVerdict::Go);
    assert!(analysis.selected_courses.contains(&"cs101".to_string()));
    assert!(analysis
        .reasoning
        .iter()
        .any(|line| line.contains("critical courses: cs101")));
    assert!(analysis.impact["cs101"].required);
    assert!(!analysis.impact["ma201"].required);
}

#[test]
fn analysis_is_idempotent() {
    let mut store = MemoryScheduleStore::new();
    store
        .courses
        .push(Course::new("cs101", "Algorithms", 75.0, 40, 28, 0).unwrap());
    store.courses.push(safe_course("ma201"));
    store.weekly.set_day(
        Weekday::Mon,
        vec![
            slot("cs101", (9, 0), (10, 30)),
            slot("ma201", (11, 0), (12, 30)),
        ],
    );

    let engine = DecisionEngine::new(&store);
    let first = engine.analyze(monday(), &prefs()).unwrap();
    let second = engine.analyze(monday(), &prefs()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn gap_and_impact_detail_is_reported() {
    let mut store = MemoryScheduleStore::new();
    store
        .courses
        .push(Course::new("cs101", "Algorithms", 75.0, 40, 28, 0).unwrap());
    store.courses.push(safe_course("ma201"));
    store.weekly.set_day(
        Weekday::Mon,
        vec![
            slot("cs101", (9, 0), (10, 30)),
            slot("ma201", (11, 0), (12, 30)),
        ],
    );

    let engine = DecisionEngine::new(&store);
    let analysis = engine.analyze(monday(), &prefs()).unwrap();

    assert_eq!(analysis.gaps.len(), 1);
    assert_eq!(analysis.gaps[0].duration_minutes, 30);

    let impact = &analysis.impact["cs101"];
    assert_eq!(impact.current_percentage, 70.0);
    assert!(impact.if_attended > impact.current_percentage);
    assert!(impact.if_skipped < impact.current_percentage);
}

#[test]
fn weekday_without_override_uses_the_template() {
    let mut store = MemoryScheduleStore::new();
    store.courses.push(safe_course("cs101"));
    store
        .weekly
        .set_day(Weekday::Mon, vec![slot("cs101", (9, 0), (10, 30))]);
    // Override on Tuesday must not affect Monday.
    store.overrides.push(ScheduleOverride {
        date: NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
        slots: Vec::new(),
        reason: None,
    });

    let engine = DecisionEngine::new(&store);
    let analysis = engine.analyze(monday(), &prefs()).unwrap();
    assert_eq!(analysis.scheduled.len(), 1);

    let tuesday = engine
        .analyze(NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(), &prefs())
        .unwrap();
    assert_eq!(tuesday.verdict, DayVerdict::NoClasses);
}
