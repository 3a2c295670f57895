use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, LevelFilter};
use serde::{Deserialize, Serialize};
use timetable_core::{
    detect_overlaps, expand_groups, layout, resolve_configs, validate_events, Configs, Event,
    EventGroup, PartialConfigs,
};

#[derive(Parser)]
#[command(name = "timetable", about = "Lay out weekly timetables from JSON", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG also applies.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a rectangle and slot for every event
    Layout {
        #[command(flatten)]
        input: InputArgs,

        /// Gap in pixels trimmed from the right edge of each rectangle
        #[arg(long, default_value_t = 0.0)]
        margin: f64,

        /// Pretty-print output JSON
        #[arg(long)]
        pretty: bool,
    },
    /// List overlapping pairs and clusters by input index (after the same
    /// checks as `layout`)
    Overlaps {
        #[command(flatten)]
        input: InputArgs,

        /// Pretty-print output JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Check configs and events without printing a layout
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Input JSON file (reads stdin if omitted or "-")
    input: Option<PathBuf>,
}

/// The JSON document accepted on input. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct TimetableInput {
    events: Vec<Event>,
    event_groups: Vec<EventGroup>,
    configs: PartialConfigs,
}

#[derive(Serialize)]
struct OverlapOutput<'a> {
    pairs: &'a [timetable_core::OverlapPair],
    clusters: &'a [timetable_core::Cluster],
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Layout {
            input,
            margin,
            pretty,
        } => {
            let (events, configs) = load(&input)?;
            let mut placed = layout(&events, &configs)?;
            if margin > 0.0 {
                for record in &mut placed {
                    record.rect = record.rect.with_trailing_margin(margin);
                }
            }
            print_json(&placed, pretty)?;
        }
        Commands::Overlaps { input, pretty } => {
            let (events, configs) = load(&input)?;
            validate_events(&events, &configs)?;
            let report = detect_overlaps(&events)?;
            print_json(
                &OverlapOutput {
                    pairs: &report.pairs,
                    clusters: &report.clusters,
                },
                pretty,
            )?;
        }
        Commands::Validate { input } => {
            let (events, configs) = load(&input)?;
            layout(&events, &configs)?;
            println!("ok: {} events", events.len());
        }
    }

    Ok(())
}

/// Read the input document, resolve configs and expand any groups. Plain
/// events are placed after the expanded ones.
fn load(args: &InputArgs) -> Result<(Vec<Event>, Configs)> {
    let raw = read_input(args)?;
    let input: TimetableInput =
        serde_json::from_str(&raw).context("Failed to parse input JSON")?;

    let configs = resolve_configs(&input.configs)?;
    if input.event_groups.is_empty() {
        return Ok((input.events, configs));
    }

    let expanded = expand_groups(&input.event_groups, &configs)?;
    debug!(
        "expanded {} groups into {} events",
        input.event_groups.len(),
        expanded.events.len()
    );
    let mut events = expanded.events;
    events.extend(input.events);
    Ok((events, expanded.configs))
}

fn read_input(args: &InputArgs) -> Result<String> {
    match &args.input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;
    println!("{out}");
    Ok(())
}
