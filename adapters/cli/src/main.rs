#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Elemental Defence headlessly.

mod plan;
mod resources;

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use elemental_defence_core::{Command, Event};
use elemental_defence_session::{apply, query, Outcome, Session};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::plan::TowerPlan;

/// Command-line arguments accepted by the binary.
#[derive(Debug, Parser)]
#[command(name = "elemental-defence")]
#[command(about = "Headless Elemental Defence simulation")]
struct Cli {
    /// Directory holding the `games`, `levels`, `maps` and `waves` folders.
    #[arg(long, global = true, default_value = "demos/resources")]
    resources: PathBuf,

    /// Name of the game file to load, without its `.g` extension.
    #[arg(long, global = true, default_value = "default")]
    game: String,

    #[command(subcommand)]
    command: CliCommand,
}

/// Subcommands offered by the binary.
#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Loads every level and reports the first configuration error.
    Validate,
    /// Simulates the game with a fixed time step.
    Run {
        /// TOML file overriding the session configuration.
        #[arg(long)]
        config: Option<PathBuf>,
        /// TOML file listing towers to buy during the run.
        #[arg(long)]
        plan: Option<PathBuf>,
        /// Seconds simulated by each tick.
        #[arg(long, default_value_t = 0.05)]
        dt: f64,
        /// Upper bound on the number of ticks before the run is abandoned.
        #[arg(long, default_value_t = 20_000)]
        max_ticks: u64,
    },
}

/// Entry point for the Elemental Defence command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        CliCommand::Validate => validate(&cli.resources, &cli.game),
        CliCommand::Run {
            config,
            plan,
            dt,
            max_ticks,
        } => run(
            &cli.resources,
            &cli.game,
            config.as_deref(),
            plan.as_deref(),
            dt,
            max_ticks,
        ),
    }
}

fn validate(root: &Path, game: &str) -> Result<()> {
    let definition = resources::load_game(root, game)?;
    for level in definition.levels() {
        println!(
            "{}: {}x{} grid, {} waves",
            level.name(),
            level.grid().columns(),
            level.grid().rows(),
            level.waves().len()
        );
    }
    println!(
        "game '{}' is valid ({} levels)",
        definition.name(),
        definition.levels().len()
    );
    Ok(())
}

fn run(
    root: &Path,
    game: &str,
    config: Option<&Path>,
    plan: Option<&Path>,
    dt: f64,
    max_ticks: u64,
) -> Result<()> {
    if !dt.is_finite() || dt <= 0.0 {
        bail!("time step must be a positive number of seconds, got {dt}");
    }
    let dt = Duration::try_from_secs_f64(dt).context("time step is out of range")?;

    let definition = resources::load_game(root, game)?;
    let config = match config {
        Some(path) => resources::load_config(path)?,
        None => Default::default(),
    };
    let mut plan = match plan {
        Some(path) => TowerPlan::load(path)?,
        None => TowerPlan::default(),
    };

    info!(game = definition.name(), levels = definition.levels().len(), "starting run");
    let mut session = Session::new(config, definition);
    let mut summary = Summary::default();
    let mut events = Vec::new();
    let mut level = query::level(&session);
    let mut level_started_at = Duration::ZERO;

    for _ in 0..max_ticks {
        if query::level(&session) != level {
            level = query::level(&session);
            level_started_at = query::elapsed(&session);
        }

        let since_level_start = query::elapsed(&session).saturating_sub(level_started_at);
        for command in plan.due(level, since_level_start) {
            apply(&mut session, command, &mut events);
        }
        apply(&mut session, Command::Tick { dt }, &mut events);

        for event in events.drain(..) {
            summary.record(&event);
        }

        if query::outcome(&session).is_some() {
            break;
        }
    }

    let player = query::player(&session);
    let outcome = match query::outcome(&session) {
        Some(Outcome::Won) => "won",
        Some(Outcome::Lost) => "lost",
        None => {
            warn!(max_ticks, "tick budget exhausted before the game ended");
            "unfinished"
        }
    };
    println!("outcome: {outcome}");
    println!("level: {}", query::level(&session) + 1);
    println!("elapsed: {:.2}s", query::elapsed(&session).as_secs_f64());
    println!("health: {}", player.health());
    println!("money: {}", player.money());
    println!("enemies defeated: {}", summary.defeated);
    println!("enemies at base: {}", summary.reached_base);
    println!("towers placed: {}", summary.towers_placed);
    println!("towers lost: {}", summary.towers_destroyed);
    Ok(())
}

/// Running tallies reported when a run ends.
#[derive(Debug, Default)]
struct Summary {
    defeated: u32,
    reached_base: u32,
    towers_placed: u32,
    towers_destroyed: u32,
}

impl Summary {
    fn record(&mut self, event: &Event) {
        match event {
            Event::EnemyDefeated { .. } => self.defeated += 1,
            Event::EnemyReachedBase { .. } => self.reached_base += 1,
            Event::TowerPlaced { .. } => self.towers_placed += 1,
            Event::TowerDestroyed { .. } => self.towers_destroyed += 1,
            Event::TimeAdvanced { .. } => return,
            _ => {}
        }
        debug!(?event, "event");
    }
}
