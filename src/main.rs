//! Thermofarm - Entry Point
//!
//! Interactive terminal driver. Ticks run on demand instead of on a timer;
//! between ticks the player shops, places entities and switches controllers.
//! Pass a TOML config path as the first argument to override defaults.

use std::io::{self, Write};
use std::path::Path;

use crossterm::style::{style, Color as TermColor, Stylize};

use thermofarm::command::{Command, CommandExecutor};
use thermofarm::core::error::Result;
use thermofarm::core::types::GridPos;
use thermofarm::core::GameConfig;
use thermofarm::render::{cell_average, temperature_color, DEFAULT_STOPS};
use thermofarm::simulation::{Action, Engine, EntityKind, GameState, HeatSource};

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("thermofarm=info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(Path::new(&path))?,
        None => GameConfig::default(),
    };

    tracing::info!("Thermofarm starting...");
    let mut engine = Engine::new(config)?;
    let mut state = engine.initial_state();

    println!("\n=== THERMOFARM ===");
    println!(
        "Keep every farm between {:.0} and {:.0} degrees.",
        engine.config().temperature.safe_low,
        engine.config().temperature.safe_high
    );
    println!();
    print_help();

    loop {
        display_status(&state);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let words: Vec<&str> = input.split_whitespace().collect();

        match words.as_slice() {
            [] => continue,
            ["quit"] | ["q"] => break,
            ["help"] | ["h"] => print_help(),
            ["tick"] | ["t"] => state = advance(&mut engine, state, 1),
            ["run", n] => match n.parse::<u64>() {
                Ok(n) => {
                    println!("Running {} ticks...", n);
                    state = advance(&mut engine, state, n);
                }
                Err(_) => println!("Usage: run <number>"),
            },
            ["status"] | ["s"] => display_detailed_status(&state, engine.config()),
            ["map"] | ["m"] => display_map(&state, engine.config()),
            ["dump"] => println!("{}", serde_json::to_string_pretty(&state)?),
            ["buy", "sensor"] => state = issue(&state, Command::BuySensor, engine.config()),
            ["buy", "controller"] => {
                state = issue(&state, Command::BuyController, engine.config())
            }
            ["cancel"] => state = issue(&state, Command::Cancel, engine.config()),
            ["toggle"] => state = issue(&state, Command::ToggleController, engine.config()),
            ["place", x, y] | ["inspect", x, y] => match parse_cell(x, y) {
                Some(cell) => {
                    let command = if words[0] == "place" {
                        Command::Place(cell)
                    } else {
                        Command::Inspect(cell)
                    };
                    state = issue(&state, command, engine.config());
                }
                None => println!("Usage: {} <x> <y>", words[0]),
            },
            _ => println!("Unknown command. Type 'help' for the list."),
        }
    }

    println!(
        "\nGoodbye! Final state: {} farms, score {:.1}, {} ticks elapsed.",
        state.farm_count(),
        state.score,
        state.time + 1
    );
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  tick / t                 - Advance simulation by one tick");
    println!("  run <n>                  - Run n simulation ticks");
    println!("  status / s               - Show detailed status");
    println!("  map / m                  - Show the game grid with temperatures");
    println!("  buy sensor|controller    - Buy an entity to place");
    println!("  place <x> <y>            - Place the bought entity");
    println!("  inspect <x> <y>          - Select a controller");
    println!("  toggle                   - Switch the selected controller on/off");
    println!("  cancel                   - Leave the current mode");
    println!("  dump                     - Print the snapshot as JSON");
    println!("  quit / q                 - Exit the game");
    println!();
}

fn advance(engine: &mut Engine, state: GameState, ticks: u64) -> GameState {
    let mut current = state;
    for _ in 0..ticks {
        let outcome = engine.tick(&current);
        current = outcome.state;
        if let Some(over) = outcome.game_over {
            println!("\n*** {} ***", over);
            println!("Final score: {:.1}. A new game has started.", over.score);
            break;
        }
    }
    current
}

fn issue(state: &GameState, command: Command, config: &GameConfig) -> GameState {
    match CommandExecutor::execute(state, command, config) {
        Ok(next) => next,
        Err(e) => {
            println!("Command failed: {}", e);
            state.clone()
        }
    }
}

fn parse_cell(x: &str, y: &str) -> Option<GridPos> {
    Some(GridPos::new(x.parse().ok()?, y.parse().ok()?))
}

/// Display a brief status summary
fn display_status(state: &GameState) {
    println!();
    println!(
        "--- Tick {} | Coins: {:.2} | Score: {:.1} | Farms: {} | Mode: {:?} ---",
        state.time,
        state.coins,
        state.score,
        state.farm_count(),
        state.action
    );
}

/// Display detailed status of the snapshot
fn display_detailed_status(state: &GameState, config: &GameConfig) {
    println!();
    println!("=== Detailed Status (Tick {}) ===", state.time);
    println!(
        "  Wind: ({:.3}, {:.3}) per tick, drift so far ({:.1}, {:.1})",
        state.wind.x, state.wind.y, state.sim_offset.x, state.sim_offset.y
    );
    println!(
        "  Next heat point at tick {} ({} ticks away)",
        state.next_heat_point,
        (state.next_heat_point - state.time).max(0)
    );

    let random = state
        .heat_points
        .iter()
        .filter(|p| p.source == HeatSource::Random)
        .count();
    println!(
        "  Heat points: {} drifting, {} from controllers",
        random,
        state.heat_points.len() - random
    );
    for p in state.heat_points.iter().filter(|p| p.source == HeatSource::Random) {
        println!(
            "    strength {:+.2} at ({:.1}, {:.1})",
            p.strength, p.pos.x, p.pos.y
        );
    }

    println!("  Entities:");
    for e in &state.entities {
        let reading = cell_average(state, config.grid.resolution, e.pos)
            .map(|t| format!("{:.2} degrees", t))
            .unwrap_or_else(|| "no reading yet".to_string());
        let suffix = match e.kind {
            EntityKind::Controller
                if state
                    .controller_heat_point(e.pos, config.grid.resolution)
                    .is_some() =>
            {
                " [on]"
            }
            EntityKind::Controller => " [off]",
            _ => "",
        };
        println!("    {:?} at {}{}: {}", e.kind, e.pos, suffix, reading);
    }

    if let Action::InspectController(cell) = state.action {
        println!("  Inspecting controller at {} - 'toggle' to switch it", cell);
    }
    println!();
}

/// Draw the game grid, one coloured glyph per cell
fn display_map(state: &GameState, config: &GameConfig) {
    println!();
    for y in 0..config.grid.rows as i32 {
        for x in 0..config.grid.columns as i32 {
            let cell = GridPos::new(x, y);
            let glyph = match state.entity_at(cell).map(|e| e.kind) {
                Some(EntityKind::Farm) => " F ",
                Some(EntityKind::Sensor) => " S ",
                Some(EntityKind::Controller) => " C ",
                None => " . ",
            };
            match cell_average(state, config.grid.resolution, cell) {
                Some(t) => {
                    let c = temperature_color(t, &DEFAULT_STOPS);
                    print!("{}", style(glyph).with(TermColor::Rgb { r: c.r, g: c.g, b: c.b }));
                }
                None => print!("{}", glyph),
            }
        }
        println!();
    }
}
