//! CLI frontend for the Kairos discrete-event simulation engine.

mod commands;
mod scenarios;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "kairos",
    about = "Kairos: a discrete-event simulation engine",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in scenarios
    List,

    /// Run a built-in scenario to completion
    Run {
        /// Scenario name (see `kairos list`)
        scenario: String,

        /// Latest simulated time an event may run at (default: per scenario)
        #[arg(short, long)]
        max_duration: Option<u64>,

        /// RNG seed for reproducible hooks
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Show the full diagnostics log
        #[arg(short, long)]
        verbose: bool,

        /// Show every scheduled action and event
        #[arg(short, long)]
        timeline: bool,

        /// Emit the run outcome as JSON instead of tables
        #[arg(long)]
        json: bool,

        /// Write the JSON outcome to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List => commands::list::run(),
        Commands::Run {
            scenario,
            max_duration,
            seed,
            verbose,
            timeline,
            json,
            output,
        } => commands::run::run(
            &scenario,
            &commands::run::RunOptions {
                max_duration,
                seed,
                verbose,
                timeline,
                json,
                output,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
