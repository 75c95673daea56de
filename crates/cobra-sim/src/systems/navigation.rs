//! Navigation: docking, launching, hyperspace and the station's spin.
//!
//! Every action checks its own preconditions and quietly does nothing when
//! they are not met.

use glam::{DQuat, DVec3};
use hecs::World;
use rand_chacha::ChaCha8Rng;

use cobra_core::blueprints::ShipCatalog;
use cobra_core::components::{Motion, Pose, Spin};
use cobra_core::constants::*;
use cobra_core::enums::{Condition, ViewDirection};
use cobra_core::events::{AudioEvent, Feedback, VisualEvent};
use cobra_core::types::forward_of;

use crate::world::GameWorld;
use crate::world_setup::{spawn_npc_ships, station_home};

/// Close enough and slow enough to dock.
pub fn can_dock(world: &GameWorld) -> bool {
    let (Some(player), Some(station)) = (world.position(world.player), world.position(world.station))
    else {
        return false;
    };
    player.distance(station) < DOCKING_RANGE && world.speed(world.player) < DOCKING_MAX_SPEED
}

/// Dock with the station. The player is parked at the origin with the
/// station back at its home position.
pub fn dock(world: &mut GameWorld) -> bool {
    if world.pilot.docked || world.pilot.is_dead() || !can_dock(world) {
        return false;
    }
    world.pilot.docked = true;
    world.pilot.condition = Condition::Docked;
    world.pilot.missile_armed = false;
    set_position(&mut world.ecs, world.player, DVec3::ZERO);
    set_position(&mut world.ecs, world.station, station_home());
    log::info!("docked at {}", world.pilot.current_system_name());
    true
}

/// Leave the station, nose pointing away from it, at rest.
pub fn launch(world: &mut GameWorld) -> bool {
    if !world.pilot.docked {
        return false;
    }
    world.pilot.docked = false;
    world.pilot.condition = Condition::Green;
    world.pilot.view = ViewDirection::Front;

    if let Ok((pose, motion)) = world
        .ecs
        .query_one_mut::<(&mut Pose, &mut Motion)>(world.player)
    {
        pose.position = DVec3::from_array(LAUNCH_POSITION);
        pose.orientation = DQuat::IDENTITY;
        motion.speed = 0.0;
        motion.roll_rate = 0.0;
        motion.pitch_rate = 0.0;
    }
    log::info!("launched from {}", world.pilot.current_system_name());
    true
}

/// Pick the next jump destination. Indices outside the galaxy are ignored.
pub fn select_hyperspace_target(world: &mut GameWorld, system: usize) -> bool {
    if system >= GALAXY.len() {
        log::warn!("ignoring hyperspace target {system}: only {} systems", GALAXY.len());
        return false;
    }
    world.pilot.hyperspace_target = system;
    true
}

/// Jump to the selected system: burn fuel, clear out the local traffic and
/// spawn a fresh set of ships around the player.
pub fn hyperspace(
    world: &mut GameWorld,
    catalog: &ShipCatalog,
    rng: &mut ChaCha8Rng,
    spawn_count: usize,
    feedback: &mut Feedback,
) -> bool {
    if world.pilot.docked || world.pilot.is_dead() || world.pilot.fuel < HYPERSPACE_FUEL_COST {
        return false;
    }
    let Some(pose) = world.pose(world.player) else {
        log::error!("player ship missing; hyperspace aborted");
        return false;
    };

    world.pilot.fuel -= HYPERSPACE_FUEL_COST;
    feedback.visual(VisualEvent::HyperspaceJump {
        origin: pose.position,
        direction: forward_of(pose.orientation),
    });
    feedback.cue(AudioEvent::HyperspaceJump);

    let from = world.pilot.current_system_name();
    world.pilot.current_system = world.pilot.hyperspace_target;
    log::info!("hyperspace {from} -> {}", world.pilot.current_system_name());

    set_position(&mut world.ecs, world.player, DVec3::ZERO);
    set_position(&mut world.ecs, world.station, station_home());

    for ship in world.npc_ships() {
        let _ = world.ecs.despawn(ship);
    }
    spawn_npc_ships(world, catalog, rng, spawn_count);
    true
}

/// Roll every spinning body about its own nose axis.
pub fn spin_station(world: &mut World, dt: f64) {
    for (_entity, (pose, spin)) in world.query_mut::<(&mut Pose, &Spin)>() {
        pose.orientation = (pose.orientation * DQuat::from_rotation_z(spin.rate * dt)).normalize();
    }
}

fn set_position(world: &mut World, entity: hecs::Entity, position: DVec3) {
    if let Ok(mut pose) = world.get::<&mut Pose>(entity) {
        pose.position = position;
    }
}
