//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Hull type. Selects a blueprint from the ship catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipClass {
    /// The player's trader.
    CobraMk3,
    /// Orbital station. Never spawned as a roaming ship.
    Coriolis,
    Sidewinder,
    Mamba,
    Krait,
    Adder,
    Gecko,
    Viper,
    Asp,
    Python,
}

/// Behaviour state of a non-player ship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    /// Drifting with random attitude jitter.
    #[default]
    Idle,
    /// Pursuing and shooting at its target.
    Attacking,
    /// Running directly away from the player.
    Fleeing,
}

/// Player condition shown on the status panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    #[default]
    Docked,
    Green,
    /// Energy exhausted; respawn is pending.
    Dead,
}

/// Camera view. Each view has its own laser mount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewDirection {
    #[default]
    Front,
    Rear,
    Left,
    Right,
}

impl ViewDirection {
    pub const ALL: [ViewDirection; 4] = [
        ViewDirection::Front,
        ViewDirection::Rear,
        ViewDirection::Left,
        ViewDirection::Right,
    ];

    /// Yaw of the view relative to the ship's nose, in radians about local +Y.
    pub fn yaw(self) -> f64 {
        use std::f64::consts::{FRAC_PI_2, PI};
        match self {
            ViewDirection::Front => 0.0,
            ViewDirection::Rear => PI,
            ViewDirection::Left => FRAC_PI_2,
            ViewDirection::Right => -FRAC_PI_2,
        }
    }

    /// Index into per-view tables such as the laser mounts.
    pub fn index(self) -> usize {
        match self {
            ViewDirection::Front => 0,
            ViewDirection::Rear => 1,
            ViewDirection::Left => 2,
            ViewDirection::Right => 3,
        }
    }
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Paused,
}
