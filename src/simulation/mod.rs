pub mod ambient;
pub mod economy;
pub mod game_over;
pub mod heat_points;
pub mod state;
pub mod step;
pub mod temperature;
pub mod tick;

pub use economy::{FarmIncome, FarmSpawning};
pub use game_over::{GameOver, GameOverCheck};
pub use heat_points::{effective_radius, heat_contribution, HeatPointStep};
pub use state::{Action, Entity, EntityKind, GameState, HeatPoint, HeatSource};
pub use step::{SimStep, Step, StepOutcome};
pub use temperature::TemperatureStep;
pub use tick::{Engine, TickOutcome};
