use std::collections::BTreeSet;
use std::error::Error;
use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use kairos_core::{Time, Timeline};
use kairos_engine::{
    DiagnosticKind, DiagnosticLog, DiscreteSimulation, RunOutcome, SimConfig, SimError,
    Termination, TracingSink,
};

use crate::scenarios;

/// Flags of the `run` subcommand.
pub struct RunOptions {
    pub max_duration: Option<Time>,
    pub seed: u64,
    pub verbose: bool,
    pub timeline: bool,
    pub json: bool,
    pub output: Option<PathBuf>,
}

pub fn run(name: &str, opts: &RunOptions) -> Result<(), String> {
    let scenario = scenarios::find(name)
        .ok_or_else(|| format!("unknown scenario \"{name}\" (see `kairos list`)"))?;

    let config = SimConfig::default()
        .with_max_duration(opts.max_duration.unwrap_or(scenario.max_duration))
        .with_seed(opts.seed);
    let sink = (DiagnosticLog::new(config.max_diagnostics), TracingSink);
    let mut sim = DiscreteSimulation::with_sink(
        config,
        (scenario.catalog)(),
        (scenario.initial_values)(),
        sink,
    );
    let outcome = sim.run().map_err(|e| describe_error(&e))?;

    if opts.json || opts.output.is_some() {
        let json = serde_json::to_string_pretty(&outcome)
            .map_err(|e| format!("failed to serialize outcome: {e}"))?;
        match &opts.output {
            Some(path) => {
                std::fs::write(path, json)
                    .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            }
            None => {
                println!("{json}");
                return Ok(());
            }
        }
    }

    // Header
    let config = sim.config();
    println!(
        "  {} '{}' {}",
        "Simulation".bold(),
        scenario.name,
        format!("(max duration {}, seed {})", config.max_duration, config.seed).dimmed()
    );
    println!(
        "  Stopped: {} at time {}, {} events executed",
        colorize_reason(outcome.reason),
        outcome.final_time,
        outcome.executed_events
    );
    if let Some(path) = &opts.output {
        println!("  Outcome written to {}", path.display());
    }
    println!();

    if opts.verbose {
        println!("  {}", "Diagnostics".bold().underline());
        println!();
        for entry in sim.sink().0.entries() {
            let time_label = format!("[t {:>4}]", entry.time).dimmed();
            println!("  {time_label} {}", colorize(&entry.kind, &entry.description));
        }
        println!();
    }

    if opts.timeline {
        println!("  {}", "Timeline".bold().underline());
        println!();
        println!("{}", timeline_table(sim.timeline()));
        println!();
    }

    println!("  {}", "Final Values".bold().underline());
    println!();
    println!("{}", values_table(&outcome));
    println!();

    Ok(())
}

/// Render an error with its chain of sources.
fn describe_error(err: &SimError) -> String {
    let mut message = format!("simulation failed: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    message
}

fn values_table(outcome: &RunOutcome) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Key", "Value"]);
    for (key, value) in &outcome.state.values {
        table.add_row(vec![key.clone(), value.to_string()]);
    }
    table
}

fn timeline_table(timeline: &Timeline) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Kind", "Name", "Weight", "Status"]);

    let times: BTreeSet<Time> = timeline
        .actions()
        .keys()
        .chain(timeline.events().keys())
        .copied()
        .collect();
    for time in times {
        if let Some(slot) = timeline.actions().get(&time) {
            for action in slot.iter() {
                table.add_row(vec![
                    time.to_string(),
                    "action".to_string(),
                    action.name().to_string(),
                    action.weight().to_string(),
                    "scheduled".to_string(),
                ]);
            }
        }
        if let Some(slot) = timeline.events().get(&time) {
            for event in slot.iter() {
                let status = if event.is_started() { "done" } else { "pending" };
                table.add_row(vec![
                    time.to_string(),
                    "event".to_string(),
                    event.name().to_string(),
                    event.weight().to_string(),
                    status.to_string(),
                ]);
            }
        }
    }
    table
}

fn colorize_reason(reason: Termination) -> colored::ColoredString {
    match reason {
        Termination::Drained => reason.to_string().green(),
        Termination::MaxDurationReached => reason.to_string().yellow(),
    }
}

fn colorize(kind: &DiagnosticKind, description: &str) -> colored::ColoredString {
    match kind {
        DiagnosticKind::RunStarted { .. } | DiagnosticKind::Finished { .. } => description.bold(),
        DiagnosticKind::ActionScheduled { .. } => description.cyan(),
        DiagnosticKind::EventExecuted { .. } => description.green(),
        DiagnosticKind::StateCommitted { .. } => description.dimmed(),
    }
}
