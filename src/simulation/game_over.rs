//! Loss detection: a farm cell left the safe temperature band

use ahash::AHashSet;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fmt;

use crate::core::config::GameConfig;
use crate::core::types::{GridPos, Tick};
use crate::simulation::state::{EntityKind, GameState};
use crate::simulation::step::{Step, StepOutcome};

/// Why a run ended
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameOver {
    pub tick: Tick,
    /// Game cell of the lost farm
    pub cell: GridPos,
    /// Offending fine cell as (column, row)
    pub fine_cell: (usize, usize),
    pub temperature: f64,
    /// Score at the moment of loss
    pub score: f64,
}

impl fmt::Display for GameOver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Game over at tick {}. Temperature is {:.2} degrees on the farm at {} (fine cell {}, {})",
            self.tick, self.temperature, self.cell, self.fine_cell.0, self.fine_cell.1
        )
    }
}

#[derive(Debug, Clone)]
pub struct GameOverCheck {
    pub resolution: u32,
    pub safe_low: f64,
    pub safe_high: f64,
}

impl GameOverCheck {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            resolution: config.grid.resolution,
            safe_low: config.temperature.safe_low,
            safe_high: config.temperature.safe_high,
        }
    }

    /// First farm-covered fine cell outside the safe band, in row-major order
    pub fn find_violation(&self, state: &GameState) -> Option<GameOver> {
        let farms: AHashSet<GridPos> = state
            .entities
            .iter()
            .filter(|e| e.kind == EntityKind::Farm)
            .map(|e| e.pos)
            .collect();
        if farms.is_empty() {
            return None;
        }

        let res = self.resolution as usize;
        state
            .temp
            .cells()
            .filter(|(_, _, t)| !(self.safe_low..=self.safe_high).contains(*t))
            .find_map(|(col, row, t)| {
                let cell = GridPos::new((col / res) as i32, (row / res) as i32);
                farms.contains(&cell).then(|| GameOver {
                    tick: state.time,
                    cell,
                    fine_cell: (col, row),
                    temperature: *t,
                    score: state.score,
                })
            })
    }
}

impl Step for GameOverCheck {
    fn name(&self) -> &'static str {
        "game_over_check"
    }

    fn apply(&self, prev: &GameState, _rng: &mut ChaCha8Rng) -> StepOutcome {
        match self.find_violation(prev) {
            Some(over) => StepOutcome::GameOver(over),
            None => StepOutcome::Continue(prev.clone()),
        }
    }
}
