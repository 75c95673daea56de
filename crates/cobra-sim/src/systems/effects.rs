//! Applies deferred effects whose due time has been reached.

use cobra_core::components::HitMarker;
use cobra_core::events::Feedback;

use crate::scheduler::{DeferredEffect, Scheduler};
use crate::systems::damage;
use crate::world::GameWorld;

/// Drain every due effect in due-time order. Returns how many ran.
pub fn run(world: &mut GameWorld, scheduler: &mut Scheduler, feedback: &mut Feedback) -> usize {
    let mut applied = 0;
    while let Some(effect) = scheduler.pop_due() {
        apply(world, effect, feedback);
        applied += 1;
    }
    applied
}

fn apply(world: &mut GameWorld, effect: DeferredEffect, feedback: &mut Feedback) {
    match effect {
        DeferredEffect::RespawnPlayer => damage::respawn_player(world),
        DeferredEffect::RemoveShip { ship, from_player } => {
            damage::remove_ship(world, ship, from_player, feedback)
        }
        DeferredEffect::ExpireHitMarker { marker } => {
            if world.ecs.get::<&HitMarker>(marker).is_ok() {
                let _ = world.ecs.despawn(marker);
            }
        }
    }
}
