//! Tick system - orchestrates simulation updates
//!
//! Each tick runs the installed step list over a working copy of the
//! previous snapshot:
//! heat points -> temperature -> farm income -> farm spawning -> game-over check
//!
//! The previous snapshot is only ever borrowed, so callers can keep it (for
//! rendering or comparison) while the next one is built.

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::simulation::game_over::GameOver;
use crate::simulation::state::GameState;
use crate::simulation::step::{SimStep, Step, StepOutcome};

/// Result of one tick
#[derive(Debug, Clone)]
pub struct TickOutcome {
    /// Snapshot to store and render; a fresh game after a loss
    pub state: GameState,
    /// Set when this tick ended the run
    pub game_over: Option<GameOver>,
}

/// Owns the configuration and the run's random source
#[derive(Debug)]
pub struct Engine {
    config: GameConfig,
    rng: ChaCha8Rng,
}

impl Engine {
    /// Engine with an OS-seeded RNG
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: ChaCha8Rng::from_entropy(),
        })
    }

    /// Reproducible engine
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fresh snapshot for a new game
    pub fn initial_state(&mut self) -> GameState {
        GameState::initial(&self.config, &mut self.rng)
    }

    /// Advance the game by one tick
    pub fn tick(&mut self, prev: &GameState) -> TickOutcome {
        let mut working = prev.advance();

        if working.steps.is_empty() {
            working.steps = Arc::new(SimStep::canonical(&self.config, &mut self.rng));
            tracing::debug!(
                tick = working.time,
                steps = working.steps.len(),
                "Installed simulation steps"
            );
        }

        self.run_steps(working)
    }

    /// Run `state.steps` in order over `state`
    ///
    /// A game-over from any step discards everything computed this tick and
    /// yields a fresh initial snapshot instead.
    pub fn run_steps(&mut self, state: GameState) -> TickOutcome {
        let steps = Arc::clone(&state.steps);
        let mut current = state;

        for step in steps.iter() {
            match step.apply(&current, &mut self.rng) {
                StepOutcome::Continue(next) => current = next,
                StepOutcome::GameOver(over) => {
                    tracing::warn!(step = step.name(), "{}", over);
                    return TickOutcome {
                        state: self.initial_state(),
                        game_over: Some(over),
                    };
                }
            }
        }

        TickOutcome {
            state: current,
            game_over: None,
        }
    }

    /// Run `ticks` ticks, collecting every loss along the way
    pub fn run(&mut self, state: GameState, ticks: u64) -> (GameState, Vec<GameOver>) {
        let mut current = state;
        let mut losses = Vec::new();

        for _ in 0..ticks {
            let outcome = self.tick(&current);
            current = outcome.state;
            losses.extend(outcome.game_over);
        }

        (current, losses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::GridPos;
    use crate::simulation::game_over::GameOverCheck;
    use crate::simulation::state::{Entity, EntityKind};
    use crate::spatial::grid::Grid;

    #[test]
    fn test_first_tick_installs_steps_and_field() {
        let config = GameConfig::default();
        let mut engine = Engine::with_seed(config.clone(), 42).unwrap();
        let state = engine.initial_state();
        assert_eq!(state.time, -1);
        assert!(state.steps.is_empty());

        let outcome = engine.tick(&state);
        assert!(outcome.game_over.is_none());

        let next = outcome.state;
        assert_eq!(next.time, 0);
        assert_eq!(next.steps.len(), 5);
        assert_eq!(next.temp.height, config.fine_rows());
        assert_eq!(next.temp.width, config.fine_columns());
        assert_eq!(next.sim_offset, state.wind);
        // Tick 0 is a farm-spawn tick
        assert_eq!(next.farm_count(), 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GameConfig::default();
        config.heat.wind_speed = 0.0;
        assert!(Engine::new(config).is_err());
    }

    #[test]
    fn test_same_seed_same_run() {
        let config = GameConfig::default();
        let mut a = Engine::with_seed(config.clone(), 7).unwrap();
        let mut b = Engine::with_seed(config, 7).unwrap();

        let start_a = a.initial_state();
        let start_b = b.initial_state();
        let (end_a, _) = a.run(start_a, 120);
        let (end_b, _) = b.run(start_b, 120);

        assert_eq!(end_a.time, end_b.time);
        assert_eq!(end_a.entities, end_b.entities);
        assert_eq!(end_a.heat_points, end_b.heat_points);
        assert_eq!(end_a.temp, end_b.temp);
    }

    #[test]
    fn test_loss_substitutes_fresh_state() {
        let config = GameConfig::default();
        let mut engine = Engine::with_seed(config.clone(), 42).unwrap();

        let mut state = engine.initial_state();
        state.time = 500;
        state.coins = 999.0;
        state.entities.push(Entity::new(EntityKind::Farm, GridPos::new(5, 5)));
        let mut temp = Grid::new(100, 100);
        temp.fill_rect(0, 0, 100, 100, 21.0);
        temp.fill_rect(50, 50, 10, 10, 30.0);
        state.temp = temp;
        state.steps = Arc::new(vec![SimStep::GameOverCheck(GameOverCheck::from_config(&config))]);

        let outcome = engine.run_steps(state);
        let over = outcome.game_over.expect("farm should be lost");
        assert_eq!(over.cell, GridPos::new(5, 5));
        assert_eq!(over.temperature, 30.0);

        assert_eq!(outcome.state.time, -1);
        assert_eq!(outcome.state.coins, config.economy.starting_coins);
        assert!(outcome.state.entities.is_empty());
        assert!(outcome.state.steps.is_empty());
    }

    #[test]
    fn test_previous_snapshot_untouched() {
        let mut engine = Engine::with_seed(GameConfig::default(), 3).unwrap();
        let state = engine.initial_state();
        let before = format!("{:?}", state);
        let _ = engine.tick(&state);
        assert_eq!(format!("{:?}", state), before);
    }
}
