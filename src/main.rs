//! ward-assign - command line front end for the room assignment engine.
//!
//! Prints a `SchedulingResult` as pretty JSON on stdout. Logs go to stderr
//! and follow `RUST_LOG` (default `info`).

use std::convert::Infallible;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ward_assign::config::EngineConfig;
use ward_assign::demo_data;
use ward_assign::models::{Room, Roster, SchedulingResult};
use ward_assign::proposal::ProposalPlanner;
use ward_assign::scheduler::{NurseScheduler, ScheduleRequest};
use ward_assign::validation::validate_input;

#[derive(Debug, Parser)]
#[command(name = "ward-assign", version, about = "Assign occupied rooms to nurses for one shift")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the allocation engine on a floor file.
    Generate {
        /// Floor JSON: `{ "nurses": [...], "rooms": [...] }`.
        #[arg(long)]
        floor: PathBuf,
        /// Engine config (TOML).
        #[arg(long, env = "WARD_ASSIGN_CONFIG")]
        config: Option<PathBuf>,
        /// Ignore last shift's nurse-room pairings.
        #[arg(long)]
        no_continuity: bool,
    },
    /// Validate an externally proposed assignment against a floor.
    Check {
        /// Floor JSON: `{ "nurses": [...], "rooms": [...] }`.
        #[arg(long)]
        floor: PathBuf,
        /// Free-text reply containing the proposal JSON.
        #[arg(long)]
        reply: PathBuf,
        /// Engine config (TOML), used if the reply cannot be read.
        #[arg(long, env = "WARD_ASSIGN_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Schedule a randomly generated floor with default nurse names.
    Demo {
        /// Nurses on shift (5, 6, or 7).
        #[arg(long, default_value_t = 6)]
        nurses: usize,
        /// Seed for a reproducible floor.
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Floor file contents.
#[derive(Debug, Deserialize)]
struct FloorPlan {
    nurses: Vec<String>,
    rooms: Vec<Room>,
}

impl FloorPlan {
    fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read floor file '{}'", path.display()))?;
        let floor: FloorPlan = serde_json::from_str(&text)
            .with_context(|| format!("invalid floor file '{}'", path.display()))?;

        if let Err(errors) = validate_input(&floor.nurses, &floor.rooms) {
            for error in &errors {
                warn!(kind = ?error.kind, "{}", error.message);
            }
        }
        Ok(floor)
    }

    fn into_request(self) -> Result<ScheduleRequest> {
        let roster = Roster::new(self.nurses)?;
        Ok(ScheduleRequest::new(roster, self.rooms))
    }
}

fn load_scheduler(config: Option<&Path>) -> Result<NurseScheduler> {
    let config = match config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    Ok(NurseScheduler::new().with_config(config))
}

fn print_result(result: &SchedulingResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate {
            floor,
            config,
            no_continuity,
        } => {
            let scheduler = load_scheduler(config.as_deref())?;
            let continuity = scheduler.config().prioritize_continuity && !no_continuity;
            let request = FloorPlan::load(&floor)?
                .into_request()?
                .with_continuity(continuity);
            let result = scheduler.schedule_request(&request);
            info!(
                assigned = result.assigned_room_count(),
                total = result.total_rooms,
                success = result.success,
                "schedule generated"
            );
            print_result(&result)
        }
        Command::Check {
            floor,
            reply,
            config,
        } => {
            let scheduler = load_scheduler(config.as_deref())?;
            let request = FloorPlan::load(&floor)?
                .into_request()?
                .with_continuity(scheduler.config().prioritize_continuity);
            let text = fs::read_to_string(&reply)
                .with_context(|| format!("failed to read reply file '{}'", reply.display()))?;
            let result =
                ProposalPlanner::new(scheduler).assess_reply(&request, Ok::<_, Infallible>(text));
            print_result(&result)
        }
        Command::Demo { nurses, seed } => {
            let roster = Roster::new(demo_data::default_nurse_names(nurses))?;
            let rooms = match seed {
                Some(seed) => demo_data::random_floor(&mut SmallRng::seed_from_u64(seed)),
                None => demo_data::random_floor(&mut rand::rng()),
            };
            info!(nurses, ?seed, "scheduling demo floor");
            let result = NurseScheduler::new().schedule(&roster, &rooms);
            print_result(&result)
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}
