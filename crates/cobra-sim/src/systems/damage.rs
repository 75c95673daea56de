//! Damage application and the ship lifecycle that follows from it:
//! player death and respawn, NPC destruction, removal and bounty.

use glam::DVec3;
use hecs::Entity;

use cobra_core::components::{Hull, Pose, ShipIdentity};
use cobra_core::constants::*;
use cobra_core::enums::Condition;
use cobra_core::events::{AudioEvent, Feedback, VisualEvent};

use crate::pilot::Shields;
use crate::scheduler::{DeferredEffect, Scheduler};
use crate::world::GameWorld;

/// Outcome of a single `apply_damage` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target absent, already destroyed, or has nothing to damage.
    Ignored,
    Absorbed,
    /// This hit took the target's energy to zero.
    Destroyed,
}

/// Apply `amount` damage to `target`.
///
/// The player soaks damage in the shields before energy. Other ships lose
/// energy directly. `from_player` decides whether a resulting kill pays bounty.
pub fn apply_damage(
    world: &mut GameWorld,
    target: Entity,
    amount: f64,
    from_player: bool,
    scheduler: &mut Scheduler,
    feedback: &mut Feedback,
) -> DamageOutcome {
    if target == world.player {
        damage_player(world, amount, scheduler, feedback)
    } else {
        damage_ship(world, target, amount, from_player, scheduler, feedback)
    }
}

fn damage_player(
    world: &mut GameWorld,
    amount: f64,
    scheduler: &mut Scheduler,
    feedback: &mut Feedback,
) -> DamageOutcome {
    let pilot = &mut world.pilot;
    let remainder = pilot.shields.absorb(amount);
    if remainder <= 0.0 {
        return DamageOutcome::Absorbed;
    }

    pilot.drain_energy(remainder);
    if pilot.energy > 0.0 || pilot.is_dead() {
        return DamageOutcome::Absorbed;
    }

    pilot.condition = Condition::Dead;
    feedback.cue(AudioEvent::PlayerDeath);
    scheduler.schedule_after(PLAYER_RESPAWN_DELAY_SECS, DeferredEffect::RespawnPlayer);
    log::info!("player destroyed; respawn in {PLAYER_RESPAWN_DELAY_SECS}s");
    DamageOutcome::Destroyed
}

fn damage_ship(
    world: &mut GameWorld,
    ship: Entity,
    amount: f64,
    from_player: bool,
    scheduler: &mut Scheduler,
    feedback: &mut Feedback,
) -> DamageOutcome {
    let Ok((identity, hull, pose)) = world
        .ecs
        .query_one_mut::<(&mut ShipIdentity, &mut Hull, &Pose)>(ship)
    else {
        return DamageOutcome::Ignored;
    };
    if !identity.alive {
        return DamageOutcome::Ignored;
    }

    hull.energy = (hull.energy - amount).max(0.0);
    if hull.energy > 0.0 {
        return DamageOutcome::Absorbed;
    }

    identity.alive = false;
    feedback.visual(VisualEvent::Explosion {
        position: pose.position,
        particles: hull.explosion_particles,
    });
    feedback.cue(AudioEvent::Explosion);
    scheduler.schedule_after(
        SHIP_REMOVAL_DELAY_SECS,
        DeferredEffect::RemoveShip { ship, from_player },
    );
    log::debug!(
        "{:?} destroyed at {} (by player: {from_player})",
        identity.class,
        pose.position
    );
    DamageOutcome::Destroyed
}

/// Despawn a destroyed ship and pay its bounty if the player earned it.
/// A ship that is already gone pays nothing.
pub fn remove_ship(world: &mut GameWorld, ship: Entity, from_player: bool, feedback: &mut Feedback) {
    let bounty = match world.ecs.get::<&Hull>(ship) {
        Ok(hull) => hull.bounty,
        Err(_) => return,
    };
    if world.ecs.despawn(ship).is_err() {
        return;
    }

    if from_player && bounty > 0.0 {
        world.pilot.cash += bounty;
        feedback.notify(
            format!("Bounty: +{bounty} CR"),
            BOUNTY_NOTIFICATION_COLOR,
            BOUNTY_NOTIFICATION_MS,
        );
        feedback.cue(AudioEvent::Bounty { amount: bounty });
        log::info!("bounty of {bounty} credited");
    }
}

/// Refill the player and bring them back at the origin.
pub fn respawn_player(world: &mut GameWorld) {
    if !world.pilot.is_dead() {
        return;
    }
    world.pilot.energy = MAX_ENERGY;
    world.pilot.shields = Shields::full();
    world.pilot.condition = Condition::Green;

    if let Ok(mut pose) = world.ecs.get::<&mut Pose>(world.player) {
        pose.position = DVec3::ZERO;
    }
    log::info!("player respawned");
}
