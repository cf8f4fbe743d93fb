//! Temperature field synthesis
//!
//! Every tick the whole fine-grid field is rebuilt from scratch: a drifting
//! noise baseline mapped into the ambient band, plus the exponentially
//! decaying contribution of each nearby heat point.

use rand_chacha::ChaCha8Rng;

use crate::core::config::GameConfig;
use crate::core::types::Vec2;
use crate::simulation::ambient::AmbientNoise;
use crate::simulation::heat_points::{effective_radius, heat_contribution};
use crate::simulation::state::GameState;
use crate::simulation::step::{Step, StepOutcome};
use crate::spatial::grid::Grid;

#[derive(Debug, Clone)]
pub struct TemperatureStep {
    pub noise: AmbientNoise,
    /// Ambient band `[low, high]`
    pub low: f64,
    pub high: f64,
    pub sample_scale: Vec2,
    pub rows: usize,
    pub columns: usize,
    pub min_effect: f64,
    pub decay_rate: f64,
}

impl TemperatureStep {
    pub fn from_config(config: &GameConfig, rng: &mut ChaCha8Rng) -> Self {
        Self {
            noise: AmbientNoise::from_rng(rng),
            low: config.temperature.ambient_low,
            high: config.temperature.ambient_high,
            sample_scale: config.temperature.sample_scale,
            rows: config.fine_rows(),
            columns: config.fine_columns(),
            min_effect: config.heat.min_effect,
            decay_rate: config.heat.decay_rate,
        }
    }

    /// Baseline temperature at a fine cell for the given wind offset
    pub fn ambient_at(&self, cell: Vec2, sim_offset: Vec2) -> f64 {
        let n = self.noise.sample((cell - sim_offset).scale(self.sample_scale));
        self.low + n * (self.high - self.low)
    }

    /// Build the full field for `state`
    pub fn synthesize(&self, state: &GameState) -> Grid<f64> {
        // Radius check is only a cheap pre-filter; the exponential never reaches zero
        let sources: Vec<(Vec2, f64, f64)> = state
            .heat_points
            .iter()
            .map(|p| {
                let r = effective_radius(p.strength, self.min_effect, self.decay_rate);
                (p.pos, p.strength, r * r)
            })
            .collect();

        let mut field = Grid::new(self.columns, self.rows);
        for row in 0..self.rows {
            for col in 0..self.columns {
                let cell = Vec2::new(col as f64, row as f64);
                let mut t = self.ambient_at(cell, state.sim_offset);

                for &(pos, strength, radius_sq) in &sources {
                    let dist_sq = (pos - cell).sqr_length();
                    if radius_sq >= dist_sq {
                        t += heat_contribution(strength, self.decay_rate, dist_sq.sqrt());
                    }
                }

                field.set(col, row, t);
            }
        }

        field
    }
}

impl Step for TemperatureStep {
    fn name(&self) -> &'static str {
        "temperature"
    }

    fn apply(&self, prev: &GameState, _rng: &mut ChaCha8Rng) -> StepOutcome {
        StepOutcome::Continue(prev.with_temp(self.synthesize(prev)))
    }
}
