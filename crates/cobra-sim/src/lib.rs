//! Flight, combat and AI simulation for Cobra.
//!
//! Owns the hecs world, runs the systems once per host frame, and produces
//! GameStateSnapshots for the frontend.

pub mod engine;
pub mod pilot;
pub mod scheduler;
pub mod systems;
pub mod world;
pub mod world_setup;

pub use cobra_core as core;
pub use engine::{SimConfig, SimulationEngine};
pub use world::GameWorld;

#[cfg(test)]
mod tests;
