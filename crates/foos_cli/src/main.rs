//! Foosball scorer CLI
//!
//! Runs the scoring engine on the host against recorded or synthetic
//! sensor input, with the LED banks drawn in the terminal.

mod console;
mod logger;
mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use foos_core::engine::constants::DISPLAY_MAX_SCORE;
use foos_core::sim::{ScriptedSensors, SensorTrace, SyntheticConfig, SyntheticSensors};
use foos_core::telemetry::{BufferedTelemetry, SENSOR_DUMP_REQUEST};
use foos_core::{
    Clock, ManualClock, MatchController, NoResetButton, PlayerScoreState, ResetSignal,
    ScorerConfig, ScorerError, SensorReader, SystemClock,
};

use console::ConsoleDisplay;
use report::RunReport;

#[derive(Parser)]
#[command(name = "foos")]
#[command(about = "Foosball goal detector and LED scoreboard", long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by the match-running subcommands
#[derive(clap::Args)]
struct RunArgs {
    /// JSON config file (overrides --profile)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Preset: standard, quick, long, sensitive
    #[arg(long)]
    profile: Option<String>,

    /// Number of matches to play
    #[arg(long, default_value = "1")]
    matches: usize,

    /// Sleep for real instead of simulating time
    #[arg(long, default_value = "false")]
    realtime: bool,

    /// Print every LED frame, animations included
    #[arg(long, default_value = "false")]
    frames: bool,

    /// Queue this many sensor-dump requests on the debug link
    #[arg(long, default_value = "0")]
    telemetry: u32,

    /// Print the report as JSON
    #[arg(long, default_value = "false")]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded sensor trace
    Simulate {
        /// Trace file: JSON array of [v1, v2] samples and "reset" markers
        #[arg(long)]
        trace: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Play against seeded synthetic sensors
    Random {
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Chance per read of a goal spike (0.0 - 1.0)
        #[arg(long, default_value = "0.02")]
        goal_rate: f64,

        /// Give up on a match after this many cycles
        #[arg(long, default_value = "100000")]
        max_cycles: u64,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Show the LED pattern for a score
    Encode {
        #[arg(long)]
        score: u8,

        /// Bit-2 goal counter
        #[arg(long, default_value = "0")]
        counter: u32,
    },

    /// Print the effective configuration as JSON
    Config {
        #[arg(long)]
        profile: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose)?;

    match cli.command {
        Commands::Simulate { trace, run } => {
            let config = load_config(run.config.as_deref(), run.profile.as_deref())?;
            let parsed = SensorTrace::from_json_file(&trace)
                .map_err(|err| load_error(err, "trace", &trace))?;
            println!("🎮 Replaying {} ({} samples)", trace.display(), parsed.len());

            let (sensors, reset) = parsed.into_parts();
            let source = trace.display().to_string();
            let report = play(sensors, reset, config, &run, source, |s: &ScriptedSensors| {
                s.remaining() as u64
            })?;
            finish(&report, run.json)?;
        }

        Commands::Random { seed, goal_rate, max_cycles, run } => {
            anyhow::ensure!(
                (0.0..=1.0).contains(&goal_rate),
                "goal rate must be between 0.0 and 1.0, got {}",
                goal_rate
            );
            let config = load_config(run.config.as_deref(), run.profile.as_deref())?;
            println!("🎲 Synthetic sensors (seed {}, goal rate {})", seed, goal_rate);

            let sensors = SyntheticSensors::new(SyntheticConfig {
                seed,
                goal_rate,
                ..SyntheticConfig::default()
            });
            let source = format!("synthetic seed {}", seed);
            let report = play(sensors, NoResetButton, config, &run, source, |_| max_cycles)?;
            finish(&report, run.json)?;
        }

        Commands::Encode { score, counter } => {
            anyhow::ensure!(
                score <= DISPLAY_MAX_SCORE,
                "score must be 0..={}, got {}",
                DISPLAY_MAX_SCORE,
                score
            );
            let mut state = PlayerScoreState { score, encoding_counter: counter };
            let pattern = state.compute_display_pattern();
            println!("score {} / counter {}", score, counter);
            println!("   LEDs:    {}", pattern);
            println!("   Bits:    0b{:04b} ({})", pattern.bits(), pattern.bits());
            println!("   Counter after read: {}", state.encoding_counter);
        }

        Commands::Config { profile } => {
            let config = load_config(None, profile.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>, profile: Option<&str>) -> Result<ScorerConfig> {
    match (path, profile) {
        (Some(path), _) => {
            ScorerConfig::from_json_file(path).map_err(|err| load_error(err, "config", path))
        }
        (None, Some(profile)) => Ok(ScorerConfig::from_profile(profile)?),
        (None, None) => Ok(ScorerConfig::from_env_or_default()),
    }
}

/// Wrap a file load failure, pointing at the file when editing it would help.
fn load_error(err: ScorerError, kind: &str, path: &Path) -> anyhow::Error {
    let hint = if err.is_recoverable() { "; fix the file and retry" } else { "" };
    let message = format!("Failed to load {}: {}{}", kind, path.display(), hint);
    anyhow::Error::new(err).context(message)
}

fn play<S, R>(
    sensors: S,
    reset: R,
    config: ScorerConfig,
    run: &RunArgs,
    source: String,
    budget: impl FnMut(&S) -> u64,
) -> Result<RunReport>
where
    S: SensorReader,
    R: ResetSignal,
{
    let mut report = RunReport::new(source, config);
    let link = BufferedTelemetry::new();
    for _ in 0..run.telemetry {
        link.push_request(SENSOR_DUMP_REQUEST);
    }

    let display = ConsoleDisplay::new(run.frames);
    if run.realtime {
        let controller = MatchController::new(config, sensors, display, reset, SystemClock::new())?
            .with_telemetry(link.clone());
        run_matches(controller, run.matches, budget, &mut report);
    } else {
        let controller = MatchController::new(config, sensors, display, reset, ManualClock::new())?
            .with_telemetry(link.clone());
        run_matches(controller, run.matches, budget, &mut report);
    }

    report.telemetry = link.sent_lines();
    report.unanswered_requests = link.pending_requests();
    Ok(report)
}

fn run_matches<S, R, C>(
    mut controller: MatchController<S, ConsoleDisplay, R, C>,
    matches: usize,
    mut budget: impl FnMut(&S) -> u64,
    report: &mut RunReport,
) where
    S: SensorReader,
    R: ResetSignal,
    C: Clock,
{
    controller.power_on();
    for _ in 0..matches {
        let cycles = budget(controller.sensors());
        if cycles == 0 {
            break;
        }
        match controller.run_match_bounded(cycles) {
            Some(outcome) => {
                println!("   {}", controller.display().render());
                report.matches.push(outcome);
            }
            None => {
                report.unfinished_cycles = controller.outcome().cycles;
                break;
            }
        }
    }
    log::info!(
        "{} display frames, {} ms on the clock",
        controller.display().frames(),
        controller.clock().now_ms()
    );
}

fn finish(report: &RunReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        report.print_summary();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_hints_at_bad_file_contents() {
        let err = load_error(ScorerError::EmptyTrace, "trace", Path::new("t.json"));
        assert_eq!(err.to_string(), "Failed to load trace: t.json; fix the file and retry");
        assert!(err.downcast_ref::<ScorerError>().is_some());

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = load_error(ScorerError::Io(io), "config", Path::new("c.json"));
        assert_eq!(err.to_string(), "Failed to load config: c.json");
    }

    #[test]
    fn test_load_config_reports_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"rules": {"max_score": 40}}"#).unwrap();

        let err = load_config(Some(&path), None).unwrap_err();
        assert!(err.to_string().ends_with("fix the file and retry"));
    }
}
