//! Headless session runner
//!
//! Runs a seeded game for a fixed number of ticks with no player input and
//! reports how it went. Useful for balancing spawn rates and decay constants.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use thermofarm::core::error::Result;
use thermofarm::core::GameConfig;
use thermofarm::simulation::{Engine, HeatSource};

#[derive(Parser, Debug)]
#[command(name = "headless_run")]
#[command(about = "Run an unattended thermofarm session and print a summary")]
struct Args {
    /// Random seed for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to simulate (default: 10 minutes at 60 ticks/s)
    #[arg(long, default_value_t = 36_000)]
    ticks: u64,

    /// TOML config overriding the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pace ticks at the configured real-time rate
    #[arg(long, default_value_t = false)]
    realtime: bool,

    /// Print the final snapshot as JSON instead of a summary
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let interval = config.tick_interval();
    let mut engine = Engine::with_seed(config, args.seed)?;
    let mut state = engine.initial_state();
    let mut losses = Vec::new();
    let mut peak_heat_points = 0;

    let start = Instant::now();
    for _ in 0..args.ticks {
        let tick_start = Instant::now();
        let outcome = engine.tick(&state);
        state = outcome.state;
        losses.extend(outcome.game_over);
        peak_heat_points = peak_heat_points.max(state.heat_points.len());

        if args.realtime {
            if let Some(rest) = interval.checked_sub(tick_start.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }
    let elapsed = start.elapsed();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    println!("Thermofarm headless run");
    println!("=======================");
    println!("Seed: {}, ticks: {}", args.seed, args.ticks);
    println!(
        "Wall time: {:.2}ms ({:.3}ms per tick)",
        elapsed.as_secs_f64() * 1000.0,
        elapsed.as_secs_f64() * 1000.0 / args.ticks.max(1) as f64
    );
    println!();
    println!("Games lost: {}", losses.len());
    for over in &losses {
        println!("  - {} (score {:.1})", over, over.score);
    }
    println!();
    println!("Current game:");
    println!("  Tick: {}", state.time);
    println!("  Coins: {:.2}, score: {:.1}", state.coins, state.score);
    println!("  Farms: {}", state.farm_count());
    println!(
        "  Heat points: {} ({} drifting), peak {}",
        state.heat_points.len(),
        state
            .heat_points
            .iter()
            .filter(|p| p.source == HeatSource::Random)
            .count(),
        peak_heat_points
    );

    Ok(())
}
