#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Balloon Defence scenarios headlessly.
//!
//! Reports go to stdout; logs go to stderr.

mod scenario;
mod session;

use std::path::PathBuf;

use anyhow::Result;
use balloon_defence_core::NormalizedPoint;
use balloon_defence_system_spawning::last_spawn_time;
use balloon_defence_world::levels;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use scenario::Scenario;
use session::{Pacing, Session};

#[derive(Parser)]
#[command(name = "balloon-defence")]
#[command(about = "Headless Balloon Defence simulation runner")]
#[command(version)]
struct Cli {
    /// Enable debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a scenario until the level completes or the tick budget runs out
    Run {
        /// TOML scenario file; the built-in scenario is used when omitted
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Override the scenario's tick budget
        #[arg(long)]
        ticks: Option<u64>,

        /// Pace ticks in real time instead of running as fast as possible
        #[arg(long)]
        realtime: bool,
    },

    /// List the level catalog
    Levels,
}

/// Entry point for the Balloon Defence command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            scenario,
            ticks,
            realtime,
        } => cmd_run(scenario, ticks, realtime),
        Commands::Levels => {
            cmd_levels();
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}

fn cmd_run(scenario: Option<PathBuf>, ticks: Option<u64>, realtime: bool) -> Result<()> {
    let scenario = match scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::built_in()?,
    };
    let pacing = if realtime {
        Pacing::Realtime
    } else {
        Pacing::Unpaced
    };

    let summary = Session::start(scenario, ticks)?.run(pacing);
    println!("{summary}");
    Ok(())
}

fn cmd_levels() {
    for definition in levels::levels() {
        let exit = definition
            .waypoints()
            .last()
            .copied()
            .unwrap_or(NormalizedPoint::new(0.0, 0.0));
        println!(
            "level {}: {} waypoints, {} balloons, last spawn at {}ms, exit at ({:.2}, {:.2})",
            definition.id(),
            definition.waypoints().len(),
            definition.mobs().len(),
            last_spawn_time(definition.mobs()).as_millis(),
            exit.x(),
            exit.y(),
        );
    }
}
