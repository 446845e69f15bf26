//! `slots` CLI — consolidate booking-platform slot JSON into timelines.
//!
//! ## Usage
//!
//! ```sh
//! # Availability timeline for one or more dimensions (stdin → stdout)
//! cat availability.json | slots availability
//!
//! # Only dimensions with something open, clipped to a window
//! slots availability -i availability.json --drop-closed \
//!   --window-start 2022-01-01T08:00:00Z --window-end 2022-01-01T18:00:00Z
//!
//! # Remaining quantity per service
//! slots services -i services.json -o timelines.json
//!
//! # One line per dimension: interval count and open/closed
//! slots summary -i availability.json
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read};
use tracing::{debug, info, Level};

use slot_timeline::{parse_availability_responses, parse_service_responses};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Consolidate reservation slots into availability and capacity timelines"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Args)]
struct Io {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
    /// Write single-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

#[derive(Args)]
struct Window {
    /// Clip timelines to start at this instant (RFC 3339)
    #[arg(long, requires = "window_end")]
    window_start: Option<DateTime<Utc>>,
    /// Clip timelines to end at this instant (RFC 3339)
    #[arg(long, requires = "window_start")]
    window_end: Option<DateTime<Utc>>,
}

impl Window {
    fn bounds(&self) -> Result<Option<(DateTime<Utc>, DateTime<Utc>)>> {
        match (self.window_start, self.window_end) {
            (Some(start), Some(end)) => {
                if start >= end {
                    anyhow::bail!("--window-start must be before --window-end");
                }
                Ok(Some((start, end)))
            }
            _ => Ok(None),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build availability (Open/Closed/Reservation) timelines per dimension
    Availability {
        #[command(flatten)]
        io: Io,
        #[command(flatten)]
        window: Window,
        /// Leave out dimensions that have no open interval
        #[arg(long)]
        drop_closed: bool,
    },
    /// Build remaining-quantity timelines per service
    Services {
        #[command(flatten)]
        io: Io,
        #[command(flatten)]
        window: Window,
    },
    /// Print interval counts and open/closed state per dimension
    Summary {
        /// Availability JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Availability {
            io,
            window,
            drop_closed,
        } => {
            let json = read_input(io.input.as_deref())?;
            let mut responses = parse_availability_responses(&json)
                .context("Failed to build availability timelines")?;
            info!(dimensions = responses.len(), "parsed availability");

            if drop_closed {
                let before = responses.len();
                responses.retain(|r| !r.is_closed());
                debug!(dropped = before - responses.len(), "dropped closed dimensions");
            }
            if let Some((start, end)) = window.bounds()? {
                for response in &mut responses {
                    response.time_slots = response.slots_between(start, end);
                }
            }

            write_json(&io, &responses)?;
        }
        Commands::Services { io, window } => {
            let json = read_input(io.input.as_deref())?;
            let mut responses =
                parse_service_responses(&json).context("Failed to build service timelines")?;
            info!(dimensions = responses.len(), "parsed services");

            if let Some((start, end)) = window.bounds()? {
                for service in responses.iter_mut().flat_map(|r| r.services.iter_mut()) {
                    service.time_slots = service.slots_between(start, end);
                }
            }

            write_json(&io, &responses)?;
        }
        Commands::Summary { input } => {
            let json = read_input(input.as_deref())?;
            let responses = parse_availability_responses(&json)
                .context("Failed to build availability timelines")?;
            for response in &responses {
                let state = if response.is_closed() { "closed" } else { "open" };
                println!(
                    "{}: {} intervals, {}",
                    response.dimension_id,
                    response.time_slots.len(),
                    state
                );
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn write_json<T: Serialize>(io: &Io, value: &T) -> Result<()> {
    let rendered = if io.compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    write_output(io.output.as_deref(), &rendered)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
