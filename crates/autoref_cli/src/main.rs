//! Autoref CLI
//!
//! Replays recorded telemetry (one JSON frame per line) through the rule
//! engine and prints every violation it finds.

use anyhow::{Context, Result};
use autoref_core::{AutoRef, Division, RefereeConfig, RefereeMode};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "autoref")]
#[command(about = "Assistant referee rule engine for SSL matches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON-lines telemetry log through the engine
    Replay {
        /// Input log file; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,

        /// Competition division (affects goal size and rule set)
        #[arg(long, value_parser = parse_division, default_value = "b")]
        division: Division,

        /// Observe only; report violations without submitting them
        #[arg(long, default_value = "false")]
        passive: bool,
    },
}

fn parse_division(value: &str) -> Result<Division, String> {
    match value.to_ascii_lowercase().as_str() {
        "a" => Ok(Division::A),
        "b" => Ok(Division::B),
        other => Err(format!("unknown division '{other}', expected 'a' or 'b'")),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            input,
            division,
            passive,
        } => {
            let config = RefereeConfig {
                division,
                mode: if passive {
                    RefereeMode::Passive
                } else {
                    RefereeMode::Active
                },
            };
            let reader: Box<dyn BufRead> = match &input {
                Some(path) => Box::new(BufReader::new(
                    File::open(path)
                        .with_context(|| format!("cannot open log file {}", path.display()))?,
                )),
                None => Box::new(BufReader::new(io::stdin())),
            };
            replay(config, reader)
        }
    }
}

fn replay(config: RefereeConfig, reader: Box<dyn BufRead>) -> Result<()> {
    log::info!(
        "replay starting (division {:?}, mode {:?})",
        config.division,
        config.mode
    );
    let mut autoref = AutoRef::new(config);
    let mut frames = 0usize;
    let mut total = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", index + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let violations = autoref
            .process_line(&line)
            .with_context(|| format!("failed to process frame on line {}", index + 1))?
            .to_vec();
        frames += 1;
        let time = autoref.snapshot().map(|s| s.time).unwrap_or_default();
        for violation in &violations {
            total += 1;
            println!("[{time:9.3}] {:<35} {}", violation.kind(), violation);
        }
    }

    println!("\n{frames} frames replayed, {total} violations");
    Ok(())
}
