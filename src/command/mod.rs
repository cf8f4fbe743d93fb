//! Player commands
//!
//! The input layer maps pointer/touch events to `Command`s; the executor
//! applies them between ticks as whole-snapshot replacements.

pub mod executor;

pub use executor::{Command, CommandExecutor};
