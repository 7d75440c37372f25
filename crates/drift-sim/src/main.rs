//! drift-sim - headless encounter runner.
//!
//! Spawns an enemy wave around an orbiting target and drives the shared enemy tree once per
//! enemy per step:
//! - `drift-sim` runs the default encounter
//! - `drift-sim --config encounter.yaml` loads tuning and scenario from YAML
//! - `drift-sim --trace trace.json` records labeled node results for every enemy

mod scenario;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use drift_enemy::{build_enemy_tree, build_enemy_tree_labeled};
use tracing_subscriber::{fmt, EnvFilter};

use scenario::{Encounter, SharedTrace, SimFile};

#[derive(Parser)]
#[command(name = "drift-sim")]
#[command(about = "Headless enemy encounter simulation", version)]
struct Cli {
    /// YAML file with enemy tuning and scenario settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of enemies to spawn
    #[arg(short, long, default_value_t = 8)]
    enemies: u64,

    /// Number of simulation steps
    #[arg(short, long, default_value_t = 3_600)]
    steps: u64,

    /// Step length in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Global RNG seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Write a JSON trace of labeled node results to this path
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    fmt().with_env_filter(filter).with_target(false).init();

    if !(cli.dt.is_finite() && cli.dt > 0.0) {
        bail!("--dt must be a positive number of seconds, got {}", cli.dt);
    }

    let config = match &cli.config {
        Some(path) => SimFile::load(path)?,
        None => SimFile::default(),
    };

    let root = if cli.trace.is_some() {
        build_enemy_tree_labeled(&config.drift.behavior)
    } else {
        build_enemy_tree(&config.drift.behavior)
    };
    let trace = cli.trace.as_ref().map(|_| SharedTrace::default());

    tracing::info!(
        enemies = cli.enemies,
        steps = cli.steps,
        dt = cli.dt,
        seed = cli.seed,
        "starting encounter"
    );

    let mut encounter = Encounter::spawn(config, cli.enemies, cli.seed, trace);
    let summary = encounter.run(&root, cli.steps, cli.dt);

    let seeking = summary.seek_steps.len();
    let longest = summary.seek_steps.values().copied().max().unwrap_or(0);
    tracing::info!(
        steps = summary.steps,
        spawned = summary.spawned,
        survivors = summary.survivors,
        reaped = summary.reaped,
        ever_seeking = seeking,
        longest_seek_steps = longest,
        "encounter finished"
    );

    if let (Some(path), Some(log)) = (&cli.trace, encounter.trace()) {
        let json = serde_json::to_string_pretty(&log).context("failed to serialize trace")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write trace {}", path.display()))?;
        tracing::info!(events = log.len(), path = %path.display(), "trace written");
    }

    Ok(())
}
