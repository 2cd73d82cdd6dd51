use std::error::Error;
use std::path::Path;

use attendo_core::{DecisionEngine, StandingBand};
use clap::Args;

use crate::common::{load_snapshot, resolve_date};

#[derive(Args)]
pub struct SimulateArgs {
    /// Target date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<String>,
    /// Course ids to mark attended, comma separated
    #[arg(long, value_delimiter = ',')]
    attend: Vec<String>,
}

pub fn run(data: &Path, args: SimulateArgs) -> Result<(), Box<dyn Error>> {
    let snapshot = load_snapshot(data)?;
    let date = resolve_date(args.date)?;

    let engine = DecisionEngine::with_config(&snapshot.store, snapshot.engine_config());
    let standings = engine.simulate(date, &args.attend)?;

    if standings.is_empty() {
        println!("nothing scheduled on {date}");
        return Ok(());
    }

    for standing in standings {
        let band = match standing.band {
            StandingBand::Critical => "critical",
            StandingBand::Warning => "warning",
            StandingBand::Safe => "safe",
        };
        println!(
            "{}: {:.1}% [{band}]",
            standing.course_id, standing.projected_percentage
        );
    }
    Ok(())
}
