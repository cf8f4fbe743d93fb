//! Command execution - turns player requests into new snapshots
//!
//! Commands run strictly between ticks. Each one either produces a whole new
//! snapshot or is rejected and leaves the caller's snapshot as it was.

use crate::core::config::GameConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{GridPos, Vec2};
use crate::simulation::state::{Action, Entity, EntityKind, GameState, HeatPoint, HeatSource};

/// A discrete request from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pay for a sensor and enter placement mode
    BuySensor,
    /// Pay for a controller and enter placement mode
    BuyController,
    /// Leave the current mode, refunding an unplaced purchase
    Cancel,
    /// Put the bought entity on a cell
    Place(GridPos),
    /// Select the controller on a cell
    Inspect(GridPos),
    /// Switch the selected controller's heat point on or off
    ToggleController,
}

/// Applies commands to snapshots
pub struct CommandExecutor;

impl CommandExecutor {
    /// Apply one command, returning the replacement snapshot
    pub fn execute(state: &GameState, command: Command, config: &GameConfig) -> Result<GameState> {
        let result = match command {
            Command::BuySensor => buy(state, Action::PlaceSensor, config.shop.sensor_cost),
            Command::BuyController => {
                buy(state, Action::PlaceController, config.shop.controller_cost)
            }
            Command::Cancel => Ok(cancel(state, config)),
            Command::Place(cell) => place(state, cell, config),
            Command::Inspect(cell) => inspect(state, cell),
            Command::ToggleController => Ok(toggle_controller(state, config)),
        };

        if let Err(e) = &result {
            tracing::debug!(?command, "Command rejected: {}", e);
        }
        result
    }
}

fn buy(state: &GameState, mode: Action, cost: f64) -> Result<GameState> {
    if state.action != Action::None {
        return Err(SimError::InvalidAction(format!(
            "cannot shop while in {:?} mode",
            state.action
        )));
    }
    if state.coins < cost {
        return Err(SimError::InsufficientCoins {
            needed: cost,
            available: state.coins,
        });
    }

    Ok(GameState {
        coins: state.coins - cost,
        action: mode,
        ..state.clone()
    })
}

fn cancel(state: &GameState, config: &GameConfig) -> GameState {
    let refund = match state.action {
        Action::PlaceSensor => config.shop.sensor_cost,
        Action::PlaceController => config.shop.controller_cost,
        Action::None | Action::InspectController(_) => 0.0,
    };

    GameState {
        coins: state.coins + refund,
        action: Action::None,
        ..state.clone()
    }
}

fn place(state: &GameState, cell: GridPos, config: &GameConfig) -> Result<GameState> {
    let kind = match state.action {
        Action::PlaceSensor => EntityKind::Sensor,
        Action::PlaceController => EntityKind::Controller,
        other => {
            return Err(SimError::InvalidAction(format!(
                "nothing to place in {:?} mode",
                other
            )))
        }
    };

    if !cell.in_bounds(config.grid.columns, config.grid.rows) {
        return Err(SimError::OutOfBounds(cell));
    }
    if let Some(existing) = state.entity_at(cell) {
        return Err(SimError::CellOccupied(cell, existing.kind));
    }

    let mut entities = state.entities.clone();
    entities.push(Entity::new(kind, cell));
    tracing::info!(tick = state.time, "{:?} placed at {}", kind, cell);

    Ok(GameState {
        entities,
        action: Action::None,
        ..state.clone()
    })
}

fn inspect(state: &GameState, cell: GridPos) -> Result<GameState> {
    if state.action != Action::None {
        return Err(SimError::InvalidAction(format!(
            "cannot inspect while in {:?} mode",
            state.action
        )));
    }
    if !state.has_entity(EntityKind::Controller, cell) {
        tracing::warn!("Inspecting non-existent controller at {}", cell);
        return Ok(GameState {
            action: Action::None,
            ..state.clone()
        });
    }

    Ok(GameState {
        action: Action::InspectController(cell),
        ..state.clone()
    })
}

fn toggle_controller(state: &GameState, config: &GameConfig) -> GameState {
    let Action::InspectController(cell) = state.action else {
        tracing::warn!("Toggle requested with no controller selected");
        return GameState {
            action: Action::None,
            ..state.clone()
        };
    };

    if !state.has_entity(EntityKind::Controller, cell) {
        tracing::warn!("Inspecting non-existent controller at {}", cell);
        return GameState {
            action: Action::None,
            ..state.clone()
        };
    }

    let resolution = config.grid.resolution;
    let mut heat_points = state.heat_points.clone();
    match state.controller_heat_point(cell, resolution) {
        Some(_) => {
            heat_points
                .retain(|p| !(p.source == HeatSource::Controller && p.cell(resolution) == cell));
            tracing::info!("Controller at {} switched off", cell);
        }
        None => {
            heat_points.push(HeatPoint {
                pos: cell.fine_center(resolution),
                strength: config.heat.controller_strength,
                source: HeatSource::Controller,
                vel: Vec2::ZERO,
            });
            tracing::info!("Controller at {} switched on", cell);
        }
    }

    GameState {
        heat_points,
        action: Action::None,
        ..state.clone()
    }
}
