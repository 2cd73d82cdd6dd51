use std::error::Error;
use std::path::Path;

use attendo_core::{compute_gaps, total_span, ScheduleStore};
use chrono::Datelike;
use clap::Args;

use crate::common::{load_snapshot, resolve_date};

#[derive(Args)]
pub struct GapsArgs {
    /// Target date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<String>,
}

pub fn run(data: &Path, args: GapsArgs) -> Result<(), Box<dyn Error>> {
    let snapshot = load_snapshot(data)?;
    let date = resolve_date(args.date)?;

    // Same resolution rule as the engine: an override replaces the
    // weekly template for its date.
    let mut slots = match snapshot.store.override_for(date) {
        Some(override_entry) => override_entry.slots,
        None => snapshot.store.weekly_slots(date.weekday()),
    };
    slots.sort_by_key(|s| s.start());

    if slots.is_empty() {
        println!("nothing scheduled on {date}");
        return Ok(());
    }

    for slot in &slots {
        let location = slot
            .location()
            .map(|l| format!(" @ {l}"))
            .unwrap_or_default();
        println!(
            "{} -> {}  {}{location}",
            slot.start().format("%H:%M"),
            slot.end().format("%H:%M"),
            slot.course_id(),
        );
    }
    for gap in compute_gaps(&slots) {
        println!(
            "gap: {} -> {} ({} min)",
            gap.start.format("%H:%M"),
            gap.end.format("%H:%M"),
            gap.duration_minutes
        );
    }
    println!("on-campus span: {} min", total_span(&slots));
    Ok(())
}
