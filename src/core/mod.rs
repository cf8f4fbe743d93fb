pub mod config;
pub mod error;
pub mod math;
pub mod types;

pub use config::GameConfig;
pub use error::{Result, SimError};
pub use types::{GridPos, Tick, Vec2};
