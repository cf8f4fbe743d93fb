//! Player commands interleaved with ticks

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use thermofarm::command::{Command, CommandExecutor};
use thermofarm::core::types::{GridPos, Vec2};
use thermofarm::core::{GameConfig, SimError};
use thermofarm::render::{cell_average, collect_field_cells, FieldView, DEFAULT_STOPS};
use thermofarm::simulation::*;

fn apply(state: &GameState, commands: &[Command], config: &GameConfig) -> GameState {
    commands.iter().fold(state.clone(), |s, c| {
        CommandExecutor::execute(&s, *c, config).unwrap()
    })
}

#[test]
fn test_controller_cools_its_cell() {
    let config = GameConfig::default();
    let mut engine = Engine::with_seed(config.clone(), 11).unwrap();
    // Corner cell, well away from where farms get planted
    let cell = GridPos::new(0, 0);

    let state = engine.initial_state();
    let state = apply(&state, &[Command::BuyController, Command::Place(cell)], &config);
    assert_eq!(state.coins, 10.0);

    let state = engine.tick(&state).state;
    let on = apply(
        &state,
        &[Command::Inspect(cell), Command::ToggleController],
        &config,
    );
    let idx = on
        .controller_heat_point(cell, config.grid.resolution)
        .expect("controller switched on");
    assert_eq!(on.heat_points[idx].pos, Vec2::new(5.0, 5.0));

    // Controller points stay put across ticks
    let ticked = engine.tick(&on).state;
    let idx = ticked
        .controller_heat_point(cell, config.grid.resolution)
        .expect("controller point survives the tick");
    assert_eq!(ticked.heat_points[idx].pos, Vec2::new(5.0, 5.0));

    // Same field with and without the controller point
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let step = TemperatureStep::from_config(&config, &mut rng);
    let with = step.synthesize(&on);
    let without = step.synthesize(&state);
    let delta = with.get(5, 5).unwrap() - without.get(5, 5).unwrap();
    assert!((delta - config.heat.controller_strength).abs() < 1e-9);
}

#[test]
fn test_toggle_twice_restores_heat_points() {
    let config = GameConfig::default();
    let mut engine = Engine::with_seed(config.clone(), 12).unwrap();
    let cell = GridPos::new(3, 3);

    let state = engine.initial_state();
    let state = apply(&state, &[Command::BuyController, Command::Place(cell)], &config);
    let before = state.heat_points.clone();

    let toggled = apply(
        &state,
        &[
            Command::Inspect(cell),
            Command::ToggleController,
            Command::Inspect(cell),
            Command::ToggleController,
        ],
        &config,
    );
    assert_eq!(toggled.heat_points, before);
    assert_eq!(toggled.action, Action::None);
}

#[test]
fn test_cannot_build_on_spawned_farm() {
    let config = GameConfig::default();
    let mut engine = Engine::with_seed(config.clone(), 13).unwrap();
    let initial = engine.initial_state();
    let state = engine.tick(&initial).state;
    let farm = state.entities[0].pos;

    let buying = apply(&state, &[Command::BuySensor], &config);
    let result = CommandExecutor::execute(&buying, Command::Place(farm), &config);
    assert!(matches!(
        result,
        Err(SimError::CellOccupied(_, EntityKind::Farm))
    ));

    // Cancelling refunds the purchase
    let cancelled = apply(&buying, &[Command::Cancel], &config);
    assert_eq!(cancelled.coins, state.coins);
}

#[test]
fn test_sensor_reveals_its_cell() {
    let config = GameConfig::default();
    let mut engine = Engine::with_seed(config.clone(), 14).unwrap();
    let sensor = GridPos::new(0, 0);

    let state = engine.initial_state();
    let state = apply(&state, &[Command::BuySensor, Command::Place(sensor)], &config);
    let state = engine.tick(&state).state;

    let mut cells = Vec::new();
    collect_field_cells(
        &state,
        config.grid.resolution,
        FieldView::Sensed,
        &DEFAULT_STOPS,
        &mut cells,
    );
    assert_eq!(cells.len(), 100);
    assert!(cells.iter().all(|c| c.column < 10 && c.row < 10));

    let average = cell_average(&state, config.grid.resolution, sensor).unwrap();
    let mean: f64 = cells.iter().map(|c| c.temperature).sum::<f64>() / cells.len() as f64;
    assert!((average - mean).abs() < 1e-9);
}
