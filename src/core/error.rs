use thiserror::Error;

use crate::core::types::GridPos;
use crate::simulation::state::EntityKind;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Cell {0} is outside the game grid")]
    OutOfBounds(GridPos),

    #[error("Cell {0} is already occupied by a {1:?}")]
    CellOccupied(GridPos, EntityKind),

    #[error("Not enough coins: need {needed}, have {available:.2}")]
    InsufficientCoins { needed: f64, available: f64 },

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
