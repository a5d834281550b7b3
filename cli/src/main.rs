//! Race Simulator CLI
//!
//! Runs a race headlessly and prints the standings as a table or JSON.

use clap::{Parser, ValueEnum};
use eyre::{Context, Result};
use race_simulator_core_rs::{Race, RaceConfig, RacerKind, Standings};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// How standings are printed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Headless race runner
#[derive(Parser, Debug)]
#[command(name = "race-sim")]
#[command(about = "Race four complexity-class racers around a track and print the standings")]
struct Args {
    /// JSON race config (overrides the flags below when given)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lap length
    #[arg(long, default_value_t = 8)]
    track_length: u64,

    /// Maximum number of steps; negative values take no steps
    #[arg(long, allow_hyphen_values = true)]
    cutoff: Option<i64>,

    /// Racers to enter, in starting order (default: all four)
    #[arg(long, value_delimiter = ',')]
    roster: Vec<RacerKind>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Include every racer's action history in JSON output
    #[arg(long)]
    history: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct RaceOutput<'a> {
    steps: u64,
    standings: &'a Standings,
    #[serde(skip_serializing_if = "Option::is_none")]
    histories: Option<Vec<HistoryOutput<'a>>>,
}

#[derive(Serialize)]
struct HistoryOutput<'a> {
    racer: &'static str,
    snapshots: &'a [race_simulator_core_rs::RacerSnapshot],
}

fn load_config(args: &Args) -> Result<RaceConfig> {
    if let Some(path) = &args.config {
        let json = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config {}", path.display()))?;
        return RaceConfig::from_json(&json)
            .wrap_err_with(|| format!("Failed to parse config {}", path.display()));
    }

    let roster = if args.roster.is_empty() {
        RacerKind::ALL.to_vec()
    } else {
        args.roster.clone()
    };

    Ok(RaceConfig {
        track_length: args.track_length,
        roster,
        cutoff: args.cutoff,
    })
}

fn print_text(race: &Race, standings: &Standings) {
    println!(
        "Track length {} - {} step(s), {:?}",
        race.track().length(),
        race.current_step(),
        race.status()
    );
    for s in standings.entries() {
        println!(
            "{:>2}. {} {:<15} {:<11} distance {:>4}  actions {:>6}{}",
            s.rank,
            s.symbol,
            s.name,
            s.complexity,
            s.distance,
            s.actions_count,
            if s.finished { "" } else { "  (running)" }
        );
    }
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    tracing::info!(
        track_length = config.track_length,
        racers = config.roster.len(),
        cutoff = ?config.cutoff,
        "starting race"
    );

    let mut race = Race::from_config(config).context("Invalid race config")?;
    let standings = race.run().context("Race simulation failed")?;

    match args.format {
        OutputFormat::Json => {
            let histories = args.history.then(|| {
                race.racer_histories()
                    .into_iter()
                    .map(|(kind, history)| HistoryOutput {
                        racer: kind.name(),
                        snapshots: history.snapshots(),
                    })
                    .collect()
            });
            let output = RaceOutput {
                steps: race.current_step(),
                standings: &standings,
                histories,
            };
            let json =
                serde_json::to_string_pretty(&output).context("Failed to serialize standings")?;
            println!("{}", json);
        }
        OutputFormat::Text => print_text(&race, &standings),
    }

    Ok(())
}

/// `RUST_LOG` wins when set; otherwise log at `info`
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    run(&args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_defaults_to_text() {
        let args = Args::parse_from(["race-sim"]);
        assert_eq!(args.format, OutputFormat::Text);

        let args = Args::parse_from(["race-sim", "--format", "json"]);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_unknown_format_is_rejected_by_parser() {
        assert!(Args::try_parse_from(["race-sim", "--format", "yaml"]).is_err());
    }

    #[test]
    fn test_missing_config_file_reports_path() {
        let args = Args::parse_from(["race-sim", "--config", "/nonexistent/race.json"]);
        let err = load_config(&args).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/race.json"));
    }

    #[test]
    fn test_rust_log_overrides_default_level() {
        std::env::set_var("RUST_LOG", "debug");
        let filter = env_filter();
        std::env::remove_var("RUST_LOG");

        assert_eq!(filter.max_level_hint(), Some(tracing::level_filters::LevelFilter::DEBUG));
    }
}
