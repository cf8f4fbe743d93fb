//! Heat-point engine: spawn, transport and cull point heat sources
//!
//! Random heat points arrive as a Poisson process, enter the field from
//! upwind and drift with the wind until their influence can no longer reach
//! the field. Controller heat points are stationary and only disappear when
//! the player switches them off.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::GameConfig;
use crate::core::types::{Tick, Vec2};
use crate::simulation::state::{GameState, HeatPoint, HeatSource};
use crate::simulation::step::{Step, StepOutcome};
use crate::spatial::ray::{ray_intersects_box, Aabb};

/// Upper bound on upwind steps when placing a new heat point
///
/// At the slowest wind `validate` allows in practice this is far more than
/// needed; it only exists so a degenerate wind cannot hang the tick.
const MAX_SPAWN_SEARCH: usize = 100_000;

/// Distance at which a heat point's contribution falls to `min_effect`
///
/// `R = ln(|strength| / min_effect) / decay_rate`, clamped at zero for
/// points too weak to ever be perceptible.
pub fn effective_radius(strength: f64, min_effect: f64, decay_rate: f64) -> f64 {
    let magnitude = strength.abs();
    if magnitude <= min_effect {
        return 0.0;
    }
    (magnitude / min_effect).ln() / decay_rate
}

/// Contribution of a heat point at `distance`
pub fn heat_contribution(strength: f64, decay_rate: f64, distance: f64) -> f64 {
    strength * (-decay_rate * distance).exp()
}

#[derive(Debug, Clone)]
pub struct HeatPointStep {
    /// Expected spawns per tick
    pub frequency: f64,
    /// Field size in fine units
    pub field: Vec2,
    pub max_strength: f64,
    pub min_effect: f64,
    pub decay_rate: f64,
}

impl Default for HeatPointStep {
    fn default() -> Self {
        Self {
            frequency: 1.0 / 360.0,
            field: Vec2::new(100.0, 100.0),
            max_strength: 10.0,
            min_effect: 0.001,
            decay_rate: 0.2,
        }
    }
}

impl HeatPointStep {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            frequency: config.heat.frequency,
            field: config.field_dimensions(),
            max_strength: config.heat.max_strength,
            min_effect: config.heat.min_effect,
            decay_rate: config.heat.decay_rate,
        }
    }

    fn bounds(&self) -> Aabb {
        Aabb::from_size(self.field)
    }

    /// Can this point still influence the field on a later tick?
    ///
    /// The disc of radius `R` sweeps a strip along the point's velocity. Three
    /// parallel rays cover it: one through the centre and one on each edge,
    /// all starting `R` behind the point so a disc straddling the boundary
    /// still counts.
    pub fn survives(&self, point: &HeatPoint) -> bool {
        if point.source == HeatSource::Controller {
            return true;
        }

        let radius = effective_radius(point.strength, self.min_effect, self.decay_rate);
        let bounds = self.bounds();
        let dir = point.vel.normalize();

        if dir.is_zero() {
            // Stationary transient point: it lives while its disc overlaps the field
            return bounds.expand(radius).contains(point.pos);
        }

        let tail = point.pos - dir * radius;
        let side = dir.perpendicular() * radius;
        [tail, tail + side, tail - side]
            .into_iter()
            .any(|origin| ray_intersects_box(origin, dir, &bounds))
    }

    /// Ticks until the next spawn, exponentially distributed with rate `frequency`
    pub fn draw_interval(&self, rng: &mut ChaCha8Rng) -> Tick {
        let u: f64 = rng.gen_range(f64::MIN_POSITIVE..1.0);
        (-u.ln() / self.frequency).floor() as Tick
    }

    /// Pick a point uniformly in the field and walk it upwind until it leaves
    ///
    /// Returns `None` for a zero wind or if the walk hits the search cap.
    pub fn spawn_position(&self, wind: Vec2, rng: &mut ChaCha8Rng) -> Option<Vec2> {
        if wind.is_zero() {
            return None;
        }

        let bounds = self.bounds();
        let mut pos = Vec2::new(
            rng.gen::<f64>() * self.field.x,
            rng.gen::<f64>() * self.field.y,
        );

        for _ in 0..MAX_SPAWN_SEARCH {
            if !bounds.contains_open(pos) {
                return Some(pos);
            }
            pos = pos - wind;
        }

        None
    }
}

impl Step for HeatPointStep {
    fn name(&self) -> &'static str {
        "heat_points"
    }

    fn apply(&self, prev: &GameState, rng: &mut ChaCha8Rng) -> StepOutcome {
        let mut heat_points: Vec<HeatPoint> = prev
            .heat_points
            .iter()
            .filter(|p| self.survives(p))
            .map(HeatPoint::advanced)
            .collect();

        let culled = prev.heat_points.len() - heat_points.len();
        if culled > 0 {
            tracing::debug!(tick = prev.time, culled, "Heat points left the field");
        }

        let mut next_heat_point = prev.next_heat_point;
        if prev.time >= prev.next_heat_point {
            next_heat_point = prev.time + self.draw_interval(rng);

            match self.spawn_position(prev.wind, rng) {
                Some(pos) => {
                    let point = HeatPoint {
                        pos,
                        strength: rng.gen::<f64>() * self.max_strength,
                        source: HeatSource::Random,
                        vel: prev.wind,
                    };
                    tracing::debug!(
                        tick = prev.time,
                        x = point.pos.x,
                        y = point.pos.y,
                        strength = point.strength,
                        next_heat_point,
                        "Heat point spawned"
                    );
                    heat_points.push(point);
                }
                None => {
                    tracing::warn!(
                        tick = prev.time,
                        "No upwind spawn position (wind {:?}); skipping heat point",
                        prev.wind
                    );
                }
            }
        }

        StepOutcome::Continue(GameState {
            heat_points,
            next_heat_point,
            ..prev.clone()
        })
    }
}
