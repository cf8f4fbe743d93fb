//! Thermofarm - tick-driven temperature simulation for a grid farming game

pub mod command;
pub mod core;
pub mod render;
pub mod simulation;
pub mod spatial;
