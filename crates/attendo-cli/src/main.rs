use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "attendo", version, about = "Should I go to class today?")]
struct Cli {
    /// JSON snapshot with courses, schedule, overrides, and preferences
    #[arg(long, global = true, default_value = "attendo.json")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide whether a day is worth the campus trip
    Decide(commands::decide::DecideArgs),
    /// Attendance standing per course
    Status(commands::status::StatusArgs),
    /// Project standings after a hypothetical day of attendance
    Simulate(commands::simulate::SimulateArgs),
    /// Show the resolved schedule, its gaps, and the on-campus span
    Gaps(commands::gaps::GapsArgs),
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Decide(args) => commands::decide::run(&cli.data, args),
        Commands::Status(args) => commands::status::run(&cli.data, args),
        Commands::Simulate(args) => commands::simulate::run(&cli.data, args),
        Commands::Gaps(args) => commands::gaps::run(&cli.data, args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
