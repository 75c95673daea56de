//! The world aggregate passed to every system.

use glam::DVec3;
use hecs::{Entity, World};

use cobra_core::components::{Motion, NpcShip, Pose, ShipIdentity};

use crate::pilot::Pilot;

/// Entity registry plus the handles and player state the systems share.
pub struct GameWorld {
    pub ecs: World,
    pub player: Entity,
    pub station: Entity,
    pub pilot: Pilot,
}

impl GameWorld {
    pub fn pose(&self, entity: Entity) -> Option<Pose> {
        self.ecs.get::<&Pose>(entity).ok().map(|p| *p)
    }

    pub fn position(&self, entity: Entity) -> Option<DVec3> {
        self.pose(entity).map(|p| p.position)
    }

    /// Current speed, zero for entities that do not move.
    pub fn speed(&self, entity: Entity) -> f64 {
        self.ecs
            .get::<&Motion>(entity)
            .map(|m| m.speed)
            .unwrap_or(0.0)
    }

    /// Registered and not in its destruction window.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.ecs
            .get::<&ShipIdentity>(entity)
            .map(|id| id.alive)
            .unwrap_or(false)
    }

    /// Whether `entity` can be chased or shot: alive, and for the player, not dead.
    pub fn is_targetable(&self, entity: Entity) -> bool {
        if entity == self.player && self.pilot.is_dead() {
            return false;
        }
        self.is_alive(entity)
    }

    /// All registered roaming ships, including destroyed ones awaiting removal.
    pub fn npc_ships(&self) -> Vec<Entity> {
        self.ecs
            .query::<&NpcShip>()
            .iter()
            .map(|(entity, _)| entity)
            .collect()
    }

    /// Roaming ships that can still be hit or collided with.
    pub fn living_npc_ships(&self) -> Vec<Entity> {
        self.ecs
            .query::<(&NpcShip, &ShipIdentity)>()
            .iter()
            .filter(|(_, (_, id))| id.alive)
            .map(|(entity, _)| entity)
            .collect()
    }
}
