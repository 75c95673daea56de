//! Cobra host application.
//!
//! Wires the simulation crates to a line-oriented front end: player commands
//! come in as JSON lines, snapshots go out the same way.

pub mod game_loop;
pub mod ipc;
pub mod state;

pub use cobra_core as core;
