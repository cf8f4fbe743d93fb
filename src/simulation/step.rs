//! Step protocol shared by every simulation stage
//!
//! A step borrows the previous snapshot and returns a new owned one. It can
//! never write through the borrow, so a stage cannot corrupt the state an
//! earlier stage handed it.

use rand_chacha::ChaCha8Rng;

use crate::core::config::GameConfig;
use crate::simulation::economy::{FarmIncome, FarmSpawning};
use crate::simulation::game_over::{GameOver, GameOverCheck};
use crate::simulation::heat_points::HeatPointStep;
use crate::simulation::state::GameState;
use crate::simulation::temperature::TemperatureStep;

/// Result of running one step
#[derive(Debug, Clone)]
pub enum StepOutcome {
    /// Hand this snapshot to the next step
    Continue(GameState),
    /// The run is lost; the rest of the tick is discarded
    GameOver(GameOver),
}

impl StepOutcome {
    /// The continuing snapshot, if the run is still alive
    pub fn into_state(self) -> Option<GameState> {
        match self {
            StepOutcome::Continue(state) => Some(state),
            StepOutcome::GameOver(_) => None,
        }
    }
}

/// A state transition built once and applied every tick
pub trait Step {
    fn name(&self) -> &'static str;

    fn apply(&self, prev: &GameState, rng: &mut ChaCha8Rng) -> StepOutcome;
}

/// The canonical simulation stages
#[derive(Debug, Clone)]
pub enum SimStep {
    HeatPoints(HeatPointStep),
    Temperature(TemperatureStep),
    FarmIncome(FarmIncome),
    FarmSpawning(FarmSpawning),
    GameOverCheck(GameOverCheck),
}

impl SimStep {
    /// Ordered step list for one run
    ///
    /// Heat points move before the field is sampled so the field reflects
    /// this tick's sources; the loss check sees the freshly synthesized field.
    pub fn canonical(config: &GameConfig, rng: &mut ChaCha8Rng) -> Vec<SimStep> {
        vec![
            SimStep::HeatPoints(HeatPointStep::from_config(config)),
            SimStep::Temperature(TemperatureStep::from_config(config, rng)),
            SimStep::FarmIncome(FarmIncome::from_config(config)),
            SimStep::FarmSpawning(FarmSpawning::from_config(config)),
            SimStep::GameOverCheck(GameOverCheck::from_config(config)),
        ]
    }

    fn inner(&self) -> &dyn Step {
        match self {
            SimStep::HeatPoints(step) => step,
            SimStep::Temperature(step) => step,
            SimStep::FarmIncome(step) => step,
            SimStep::FarmSpawning(step) => step,
            SimStep::GameOverCheck(step) => step,
        }
    }
}

impl Step for SimStep {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn apply(&self, prev: &GameState, rng: &mut ChaCha8Rng) -> StepOutcome {
        self.inner().apply(prev, rng)
    }
}
