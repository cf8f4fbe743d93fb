//! Game state snapshot
//!
//! One `GameState` describes a single instant of the game. Ticks and
//! commands never edit a snapshot in place: they borrow the previous one
//! and build the next by value, usually with struct-update syntax.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::sync::Arc;

use crate::core::config::GameConfig;
use crate::core::types::{GridPos, Tick, Vec2};
use crate::simulation::step::SimStep;
use crate::spatial::grid::Grid;

/// What occupies a game cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Sensor,
    Controller,
    Farm,
}

/// Something placed on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub pos: GridPos,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: GridPos) -> Self {
        Self { pos, kind }
    }
}

/// Origin of a heat point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatSource {
    /// Wind-borne, culled once it can no longer reach the field
    Random,
    /// Emitted by a switched-on controller; lives until switched off
    Controller,
}

/// Point perturbation of the temperature field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint {
    /// Position in fine-grid units
    pub pos: Vec2,
    /// Peak contribution in degrees; negative cools
    pub strength: f64,
    pub source: HeatSource,
    /// Displacement per tick
    pub vel: Vec2,
}

impl HeatPoint {
    /// Same point moved one tick along its velocity
    pub fn advanced(&self) -> Self {
        Self {
            pos: self.pos + self.vel,
            ..*self
        }
    }

    /// Game cell the point currently sits in
    pub fn cell(&self, resolution: u32) -> GridPos {
        GridPos::from_fine(self.pos, resolution)
    }
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Action {
    #[default]
    None,
    /// A sensor has been bought and awaits a cell
    PlaceSensor,
    /// A controller has been bought and awaits a cell
    PlaceController,
    /// The controller at this cell is selected
    InspectController(GridPos),
}

/// One immutable snapshot of the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub entities: Vec<Entity>,
    /// Constant for the run; drives noise drift and heat transport
    pub wind: Vec2,
    /// Integral of wind over all ticks so far
    pub sim_offset: Vec2,
    pub heat_points: Vec<HeatPoint>,
    /// Tick at which the next random heat point spawns
    pub next_heat_point: Tick,
    /// Fine-grid temperatures; empty until the first tick
    pub temp: Grid<f64>,
    /// Installed on the first tick; shared by every snapshot of a run
    #[serde(skip)]
    pub steps: Arc<Vec<SimStep>>,
    pub coins: f64,
    pub score: f64,
    pub action: Action,
    pub time: Tick,
}

impl GameState {
    /// Fresh snapshot for a new game
    ///
    /// Wind gets a random heading; the first heat point is scheduled an
    /// exponentially distributed delay into the run.
    pub fn initial(config: &GameConfig, rng: &mut ChaCha8Rng) -> Self {
        let heading = rng.gen_range(0.0..TAU);
        let wind = Vec2::new(config.wind_per_tick(), 0.0).rotate(heading);

        let u: f64 = rng.gen_range(f64::MIN_POSITIVE..1.0);
        let mean_ticks =
            config.heat.first_heat_point_mean_seconds * config.grid.target_fps as f64;
        let next_heat_point = (-u.ln() * mean_ticks).floor() as Tick;

        Self {
            entities: Vec::new(),
            wind,
            sim_offset: Vec2::ZERO,
            heat_points: Vec::new(),
            next_heat_point,
            temp: Grid::empty(),
            steps: Arc::default(),
            coins: config.economy.starting_coins,
            score: 0.0,
            action: Action::None,
            time: -1,
        }
    }

    /// Working copy for the next tick: time advanced, wind integrated
    pub fn advance(&self) -> Self {
        Self {
            sim_offset: self.sim_offset + self.wind,
            time: self.time + 1,
            ..self.clone()
        }
    }

    /// Same snapshot with its temperature field replaced
    ///
    /// Avoids cloning the outgoing field only to drop it.
    pub fn with_temp(&self, temp: Grid<f64>) -> Self {
        Self {
            entities: self.entities.clone(),
            wind: self.wind,
            sim_offset: self.sim_offset,
            heat_points: self.heat_points.clone(),
            next_heat_point: self.next_heat_point,
            temp,
            steps: Arc::clone(&self.steps),
            coins: self.coins,
            score: self.score,
            action: self.action,
            time: self.time,
        }
    }

    pub fn entity_at(&self, pos: GridPos) -> Option<&Entity> {
        self.entities.iter().find(|e| e.pos == pos)
    }

    pub fn has_entity(&self, kind: EntityKind, pos: GridPos) -> bool {
        self.entities.iter().any(|e| e.pos == pos && e.kind == kind)
    }

    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    pub fn farm_count(&self) -> usize {
        self.count_of(EntityKind::Farm)
    }

    /// Index of the controller-emitted heat point sitting in `cell`
    pub fn controller_heat_point(&self, cell: GridPos, resolution: u32) -> Option<usize> {
        self.heat_points
            .iter()
            .position(|p| p.source == HeatSource::Controller && p.cell(resolution) == cell)
    }
}
