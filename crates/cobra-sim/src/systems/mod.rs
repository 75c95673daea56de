//! Systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over the `GameWorld` (or the bare ECS world
//! where nothing else is needed). They do not own state; everything lives in
//! components, the pilot record or the scheduler.

pub mod ai;
pub mod beams;
pub mod collision;
pub mod controls;
pub mod damage;
pub mod effects;
pub mod kinematics;
pub mod missiles;
pub mod navigation;
pub mod regen;
pub mod scanner;
pub mod snapshot;
pub mod weapons;
