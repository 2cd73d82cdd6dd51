use std::error::Error;
use std::path::Path;

use attendo_core::{DayVerdict, DecisionEngine};
use clap::Args;

use crate::common::{load_snapshot, resolve_date};

#[derive(Args)]
pub struct DecideArgs {
    /// Target date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<String>,
    /// Print the full analysis as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(data: &Path, args: DecideArgs) -> Result<(), Box<dyn Error>> {
    let snapshot = load_snapshot(data)?;
    let date = resolve_date(args.date)?;

    let engine = DecisionEngine::with_config(&snapshot.store, snapshot.engine_config());
    let analysis = engine.analyze(date, &snapshot.preferences)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    let verdict = match analysis.verdict {
        DayVerdict::NoClasses => "stay home (no classes)",
        DayVerdict::Go => "go to campus",
        DayVerdict::Skip => "skip today",
    };
    println!("{date}: {verdict} ({}% confidence)", analysis.confidence);

    if !analysis.selected_courses.is_empty() {
        println!("attend: {}", analysis.selected_courses.join(", "));
    }
    for gap in &analysis.gaps {
        println!(
            "gap: {} -> {} ({} min)",
            gap.start.format("%H:%M"),
            gap.end.format("%H:%M"),
            gap.duration_minutes
        );
    }
    for line in &analysis.reasoning {
        println!("  - {line}");
    }
    Ok(())
}
