//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems.

use glam::{DQuat, DVec3};
use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Hull type and liveness. A ship with `alive == false` is in its destruction
/// window: still registered, but untargetable and non-collidable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShipIdentity {
    pub class: ShipClass,
    pub alive: bool,
}

/// Position and attitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec3,
    /// Unit quaternion, renormalized every kinematics step.
    pub orientation: DQuat,
}

impl Pose {
    pub fn new(position: DVec3, orientation: DQuat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub fn at(position: DVec3) -> Self {
        Self::new(position, DQuat::IDENTITY)
    }
}

/// Motion intents. Rates are in rad/s and decay toward zero each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub speed: f64,
    pub max_speed: f64,
    pub roll_rate: f64,
    pub pitch_rate: f64,
}

/// Combat stats for non-player ships. The player's equivalents live on the pilot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hull {
    /// Kept within `0..=max_energy`.
    pub energy: f64,
    pub max_energy: f64,
    pub laser_power: f64,
    pub missiles: u32,
    /// Cash paid for a player kill. Zero for lawful ships.
    pub bounty: f64,
    /// Particle count of the death explosion.
    pub explosion_particles: u32,
}

/// Behaviour controller state for non-player ships.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AiBrain {
    pub state: AiState,
    /// Weak handle. The target may have been despawned or killed; check before use.
    #[serde(skip)]
    pub target: Option<Entity>,
}

/// Constant roll about the local nose axis (the station's slow spin).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Spin {
    pub rate: f64,
}

/// Transient beam kept around for rendering. Hits were resolved when it was fired.
#[derive(Debug, Clone, Copy)]
pub struct LaserBeam {
    pub shooter: Entity,
    pub origin: DVec3,
    pub direction: DVec3,
    pub lifetime_secs: f64,
}

/// Spark drawn where a beam passed closest to the ship it hit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HitMarker {
    pub position: DVec3,
}

/// Marks the player's ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerShip;

/// Marks the orbital station.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Station;

/// Marks a roaming, AI-driven ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NpcShip;
