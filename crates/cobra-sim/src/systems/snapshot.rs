//! Snapshot system: queries the world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. Feedback is handed in already drained.

use hecs::Entity;

use cobra_core::components::*;
use cobra_core::constants::BEAM_LENGTH;
use cobra_core::enums::GamePhase;
use cobra_core::events::Feedback;
use cobra_core::state::*;
use cobra_core::types::SimTime;

use crate::pilot::Pilot;
use crate::systems::scanner;
use crate::world::GameWorld;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &GameWorld,
    time: &SimTime,
    phase: GamePhase,
    feedback: Feedback,
) -> GameStateSnapshot {
    let scanner = match (world.pose(world.player), world.position(world.station)) {
        (Some(viewer), Some(station)) => scanner::project(&viewer, station),
        _ => ScannerView::default(),
    };

    GameStateSnapshot {
        time: *time,
        phase,
        pilot: build_pilot(&world.pilot),
        player: build_ship(world, world.player),
        station: build_ship(world, world.station),
        ships: build_ships(world),
        beams: build_beams(world),
        hit_markers: build_hit_markers(world),
        scanner,
        audio_events: feedback.audio,
        notifications: feedback.notifications,
        visual_events: feedback.visuals,
    }
}

fn build_pilot(pilot: &Pilot) -> PilotView {
    PilotView {
        condition: pilot.condition,
        docked: pilot.docked,
        energy: pilot.energy,
        shield_fore: pilot.shields.fore,
        shield_aft: pilot.shields.aft,
        cash: pilot.cash,
        fuel: pilot.fuel,
        missiles: pilot.missiles,
        missile_armed: pilot.missile_armed,
        view: pilot.view,
        laser_power: pilot.laser_power(),
        current_system: pilot.current_system_name().to_string(),
        hyperspace_target: pilot.hyperspace_target_name().to_string(),
    }
}

/// View of one entity. Stats that only NPCs carry are left empty for the
/// player and the station.
fn build_ship(world: &GameWorld, entity: Entity) -> Option<ShipView> {
    let mut query = world
        .ecs
        .query_one::<(&ShipIdentity, &Pose, Option<&Motion>, Option<&Hull>, Option<&AiBrain>)>(
            entity,
        )
        .ok()?;
    let (identity, pose, motion, hull, brain) = query.get()?;

    Some(ShipView {
        id: entity.to_bits().get(),
        class: identity.class,
        position: pose.position,
        orientation: pose.orientation,
        speed: motion.map(|m| m.speed).unwrap_or(0.0),
        alive: identity.alive,
        ai_state: brain.map(|b| b.state),
        energy: hull.map(|h| h.energy),
    })
}

/// Roaming ships, sorted by id so the order is stable across ticks.
fn build_ships(world: &GameWorld) -> Vec<ShipView> {
    let mut ships: Vec<ShipView> = world
        .npc_ships()
        .into_iter()
        .filter_map(|ship| build_ship(world, ship))
        .collect();
    ships.sort_by_key(|s| s.id);
    ships
}

fn build_beams(world: &GameWorld) -> Vec<BeamView> {
    world
        .ecs
        .query::<&LaserBeam>()
        .iter()
        .map(|(_, beam)| BeamView {
            start: beam.origin,
            end: beam.origin + beam.direction * BEAM_LENGTH,
            from_player: beam.shooter == world.player,
        })
        .collect()
}

fn build_hit_markers(world: &GameWorld) -> Vec<glam::DVec3> {
    world
        .ecs
        .query::<&HitMarker>()
        .iter()
        .map(|(_, marker)| marker.position)
        .collect()
}
