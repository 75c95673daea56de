//! Player input sent from the host to the simulation.
//!
//! Held actions travel as a `ControlState` that the engine polls once per tick.
//! Discrete actions are commands queued for the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::ViewDirection;

/// Actions currently held down. Replaced wholesale by `PlayerCommand::SetControls`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlState {
    pub roll_left: bool,
    pub roll_right: bool,
    pub pitch_up: bool,
    pub pitch_down: bool,
    pub speed_up: bool,
    pub speed_down: bool,
    pub fire_laser: bool,
    pub target_missile: bool,
    pub fire_missile: bool,
    pub unarm_missile: bool,
}

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Input ---
    /// Replace the held-action state.
    SetControls { controls: ControlState },
    /// Switch the camera view (and with it the active laser mount).
    SetView { view: ViewDirection },

    // --- Navigation ---
    /// Leave the station.
    Launch,
    /// Dock, if close enough and slow enough.
    Dock,
    /// Choose the destination of the next jump. Out-of-range indices are ignored.
    SelectHyperspaceTarget { system: usize },
    /// Jump to the selected system, if there is fuel.
    Hyperspace,

    // --- Simulation control ---
    Pause,
    Resume,
}
