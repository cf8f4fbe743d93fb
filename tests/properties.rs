//! Property tests for geometry, sampling and command invariants

use ahash::AHashSet;
use proptest::prelude::*;

use thermofarm::command::{Command, CommandExecutor};
use thermofarm::core::math::weighted_index;
use thermofarm::core::types::{GridPos, Vec2};
use thermofarm::core::GameConfig;
use thermofarm::simulation::*;
use thermofarm::spatial::{ray_intersects_box, Aabb};

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::BuySensor),
        Just(Command::BuyController),
        Just(Command::Cancel),
        Just(Command::ToggleController),
        (-1i32..11, -1i32..11).prop_map(|(x, y)| Command::Place(GridPos::new(x, y))),
        (0i32..10, 0i32..10).prop_map(|(x, y)| Command::Inspect(GridPos::new(x, y))),
    ]
}

proptest! {
    #[test]
    fn ray_aimed_at_field_centre_always_hits(ox in -500.0f64..500.0, oy in -500.0f64..500.0) {
        let bounds = Aabb::from_size(Vec2::new(100.0, 100.0));
        let origin = Vec2::new(ox, oy);
        let direction = Vec2::new(50.0, 50.0) - origin;
        prop_assume!(!direction.is_zero());
        prop_assert!(ray_intersects_box(origin, direction, &bounds));
    }

    #[test]
    fn ray_pointing_away_from_field_misses(ox in 101.0f64..500.0, oy in 101.0f64..500.0) {
        let bounds = Aabb::from_size(Vec2::new(100.0, 100.0));
        prop_assert!(!ray_intersects_box(Vec2::new(ox, oy), Vec2::new(1.0, 0.5), &bounds));
    }

    #[test]
    fn weighted_index_picks_a_positive_weight(
        weights in prop::collection::vec(0.0f64..10.0, 1..20),
        draw in 0.0f64..1.0,
    ) {
        let total: f64 = weights.iter().sum();
        match weighted_index(&weights, draw) {
            Some(i) => {
                prop_assert!(i < weights.len());
                prop_assert!(weights[i] > 0.0);
            }
            None => prop_assert!(total <= 0.0),
        }
    }

    #[test]
    fn contribution_at_effective_radius_is_min_effect(
        strength in prop_oneof![-50.0f64..-0.01, 0.01f64..50.0],
        min_effect in 0.0001f64..0.005,
        decay_rate in 0.05f64..1.0,
    ) {
        let radius = effective_radius(strength, min_effect, decay_rate);
        let at_radius = heat_contribution(strength, decay_rate, radius).abs();
        prop_assert!((at_radius - min_effect).abs() <= min_effect * 1e-9);

        let beyond = heat_contribution(strength, decay_rate, radius + 1.0).abs();
        prop_assert!(beyond < min_effect);
    }

    #[test]
    fn commands_never_stack_entities(commands in prop::collection::vec(command_strategy(), 0..60)) {
        let config = GameConfig::default();
        let mut engine = Engine::with_seed(config.clone(), 21).unwrap();
        let initial = engine.initial_state();
        let mut state = engine.tick(&initial).state;
        state.coins = 1000.0;

        for command in commands {
            if let Ok(next) = CommandExecutor::execute(&state, command, &config) {
                state = next;
            }

            let cells: AHashSet<GridPos> = state.entities.iter().map(|e| e.pos).collect();
            prop_assert_eq!(cells.len(), state.entities.len());
            prop_assert!(state
                .entities
                .iter()
                .all(|e| e.pos.in_bounds(config.grid.columns, config.grid.rows)));
            prop_assert!(state.coins >= 0.0);

            let controller_points = state
                .heat_points
                .iter()
                .filter(|p| p.source == HeatSource::Controller)
                .count();
            prop_assert!(controller_points <= state.count_of(EntityKind::Controller));
        }
    }
}
