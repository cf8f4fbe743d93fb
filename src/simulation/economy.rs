//! Farm economy: per-tick income and periodic farm placement

use ahash::AHashSet;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::GameConfig;
use crate::core::math::weighted_index;
use crate::core::types::{GridPos, Vec2};
use crate::simulation::state::{Entity, EntityKind, GameState};
use crate::simulation::step::{Step, StepOutcome};

/// Every farm earns coins and score each tick
#[derive(Debug, Clone)]
pub struct FarmIncome {
    pub coin_rate: f64,
    pub score_rate: f64,
}

impl FarmIncome {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            coin_rate: config.coin_rate(),
            score_rate: config.score_rate(),
        }
    }
}

impl Step for FarmIncome {
    fn name(&self) -> &'static str {
        "farm_income"
    }

    fn apply(&self, prev: &GameState, _rng: &mut ChaCha8Rng) -> StepOutcome {
        let farms = prev.farm_count() as f64;
        StepOutcome::Continue(GameState {
            coins: prev.coins + farms * self.coin_rate,
            score: prev.score + farms * self.score_rate,
            ..prev.clone()
        })
    }
}

/// Places a farm every `period` ticks, favouring cells near the centre
#[derive(Debug, Clone)]
pub struct FarmSpawning {
    pub period: u64,
    pub columns: u32,
    pub rows: u32,
}

impl FarmSpawning {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            period: config.farm_period_ticks(),
            columns: config.grid.columns,
            rows: config.grid.rows,
        }
    }

    /// Free interior cells, closest to the grid centre first
    ///
    /// The border ring is never farmed. Ties keep column-major scan order.
    pub fn candidates(&self, state: &GameState) -> Vec<GridPos> {
        let occupied: AHashSet<GridPos> = state.entities.iter().map(|e| e.pos).collect();
        let columns = self.columns as i32;
        let rows = self.rows as i32;

        let mut cells: Vec<GridPos> = (1..columns - 1)
            .flat_map(|x| (1..rows - 1).map(move |y| GridPos::new(x, y)))
            .filter(|cell| !occupied.contains(cell))
            .collect();

        let middle = Vec2::new(self.columns as f64, self.rows as f64) * 0.5;
        let dist_sq = |c: &GridPos| (Vec2::new(c.x as f64, c.y as f64) - middle).sqr_length();
        cells.sort_by(|a, b| dist_sq(a).total_cmp(&dist_sq(b)));
        cells
    }

    /// Weighted draw over the sorted candidates with weight `e^-rank`
    pub fn choose(&self, state: &GameState, rng: &mut ChaCha8Rng) -> Option<GridPos> {
        let cells = self.candidates(state);
        let weights: Vec<f64> = (0..cells.len()).map(|rank| (-(rank as f64)).exp()).collect();
        weighted_index(&weights, rng.gen::<f64>()).map(|i| cells[i])
    }
}

impl Step for FarmSpawning {
    fn name(&self) -> &'static str {
        "farm_spawning"
    }

    fn apply(&self, prev: &GameState, rng: &mut ChaCha8Rng) -> StepOutcome {
        if prev.time.rem_euclid(self.period as i64) != 0 {
            return StepOutcome::Continue(prev.clone());
        }

        let Some(cell) = self.choose(prev, rng) else {
            tracing::debug!(tick = prev.time, "No free cell for a new farm");
            return StepOutcome::Continue(prev.clone());
        };

        tracing::info!(tick = prev.time, "Farm planted at {}", cell);
        let mut entities = prev.entities.clone();
        entities.push(Entity::new(EntityKind::Farm, cell));

        StepOutcome::Continue(GameState {
            entities,
            ..prev.clone()
        })
    }
}
