use std::error::Error;
use std::path::Path;

use attendo_core::{AttendanceTracker, ScheduleStore};
use clap::Args;

use crate::common::load_snapshot;

#[derive(Args)]
pub struct StatusArgs {
    /// Print per-course status as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(data: &Path, args: StatusArgs) -> Result<(), Box<dyn Error>> {
    let snapshot = load_snapshot(data)?;
    let tracker = AttendanceTracker::new();

    if args.json {
        let statuses: Vec<_> = snapshot
            .store
            .courses()
            .iter()
            .map(|c| (c.id().to_string(), tracker.status(c)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    for course in snapshot.store.courses() {
        let status = tracker.status(&course);
        let mut line = format!(
            "{} ({}): {:.1}% of {} held, need {}, can skip {}",
            course.id(),
            course.name(),
            status.current_percentage,
            status.held_classes,
            status.classes_still_needed,
            status.classes_skippable,
        );
        if status.at_risk {
            line.push_str(" [at risk]");
        }

        if let Some(remaining) = snapshot.store.remaining_classes_in_term(course.id()) {
            let projection = tracker.project_future(&course, remaining);
            line.push_str(&format!(
                "; {} of the next {} are mandatory",
                projection.minimum_must_attend, remaining
            ));
            if !tracker.is_recoverable(&course, remaining) {
                line.push_str(" [unattainable this term]");
            }
        }
        println!("{line}");
    }
    Ok(())
}
