//! Proximity collisions between the player and the station or other ships.
//!
//! Contacts are checked once per tick per pair. A ship contact damages both
//! parties by their combined speed and shoves them apart; there is no
//! resting contact, so a pair still overlapping next tick collides again.
//! Collision damage never counts as a player kill.

use glam::DVec3;
use hecs::Entity;

use cobra_core::components::Pose;
use cobra_core::constants::*;
use cobra_core::events::{AudioEvent, Feedback};

use crate::scheduler::Scheduler;
use crate::systems::damage;
use crate::world::GameWorld;

/// What happened during one collision pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Close and slow enough to dock.
    pub docking_window: bool,
    /// Damage taken from hitting the station too fast.
    pub station_impact: Option<f64>,
    /// Ships the player ran into, with the damage each side took.
    pub ship_contacts: Vec<(Entity, f64)>,
}

/// Run the collision checks for the flying player.
pub fn run(world: &mut GameWorld, scheduler: &mut Scheduler, feedback: &mut Feedback) -> CollisionReport {
    let mut report = CollisionReport::default();
    let player = world.player;
    let Some(player_pos) = world.position(player) else {
        return report;
    };
    let player_speed = world.speed(player);

    // Station.
    if let Some(station_pos) = world.position(world.station) {
        let distance = player_pos.distance(station_pos);
        if distance < DOCKING_RANGE && player_speed < DOCKING_MAX_SPEED {
            report.docking_window = true;
        } else if distance < STATION_COLLISION_RANGE && player_speed > DOCKING_MAX_SPEED {
            let amount = STATION_COLLISION_BASE_DAMAGE + player_speed;
            damage::apply_damage(world, player, amount, false, scheduler, feedback);
            feedback.cue(AudioEvent::Collision);
            report.station_impact = Some(amount);
        }
    }

    // Ships.
    for ship in world.living_npc_ships() {
        let (Some(player_pos), Some(ship_pos)) = (world.position(player), world.position(ship))
        else {
            continue;
        };
        if player_pos.distance(ship_pos) >= COLLISION_THRESHOLD {
            continue;
        }

        let amount = (world.speed(player) + world.speed(ship)) * SHIP_COLLISION_DAMAGE_FACTOR;
        damage::apply_damage(world, player, amount, false, scheduler, feedback);
        damage::apply_damage(world, ship, amount, false, scheduler, feedback);
        feedback.cue(AudioEvent::Collision);

        push_apart(world, player, ship, player_pos, ship_pos);
        report.ship_contacts.push((ship, amount));
    }

    report
}

/// Move each party `COLLISION_PUSH_DISTANCE` away from the other along the
/// line between them. Coincident positions are left alone.
fn push_apart(world: &mut GameWorld, a: Entity, b: Entity, a_pos: DVec3, b_pos: DVec3) {
    let push = (a_pos - b_pos).normalize_or_zero() * COLLISION_PUSH_DISTANCE;
    if let Ok(mut pose) = world.ecs.get::<&mut Pose>(a) {
        pose.position += push;
    }
    if let Ok(mut pose) = world.ecs.get::<&mut Pose>(b) {
        pose.position -= push;
    }
}
