//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player ship, the station and roaming ships with
//! appropriate component bundles.

use glam::{DQuat, DVec3, EulerRot};
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use cobra_core::blueprints::{ShipBlueprint, ShipCatalog};
use cobra_core::components::*;
use cobra_core::constants::*;
use cobra_core::enums::ShipClass;
use cobra_core::error::ConfigError;
use cobra_core::types::direction_from_samples;

use crate::pilot::Pilot;
use crate::world::GameWorld;

/// Build the start-of-game world: player docked at the origin, the station
/// ahead of it, and a first batch of roaming ships.
pub fn build_world(
    catalog: &ShipCatalog,
    rng: &mut ChaCha8Rng,
    spawn_count: usize,
) -> Result<GameWorld, ConfigError> {
    let mut ecs = World::new();
    let player = spawn_player(&mut ecs, blueprint(catalog, ShipClass::CobraMk3)?);
    let station = spawn_station(&mut ecs, blueprint(catalog, ShipClass::Coriolis)?);

    let mut world = GameWorld {
        ecs,
        player,
        station,
        pilot: Pilot::default(),
    };
    spawn_npc_ships(&mut world, catalog, rng, spawn_count);
    Ok(world)
}

fn blueprint(catalog: &ShipCatalog, class: ShipClass) -> Result<&ShipBlueprint, ConfigError> {
    catalog
        .get(class)
        .ok_or(ConfigError::MissingBlueprint(class))
}

/// Spawn the player's ship at the origin, at rest.
pub fn spawn_player(ecs: &mut World, blueprint: &ShipBlueprint) -> Entity {
    ecs.spawn((
        PlayerShip,
        ShipIdentity {
            class: blueprint.class,
            alive: true,
        },
        Pose::at(DVec3::ZERO),
        Motion {
            max_speed: blueprint.max_speed,
            ..Default::default()
        },
    ))
}

/// Spawn the station down -Z, slowly spinning about its axis.
pub fn spawn_station(ecs: &mut World, blueprint: &ShipBlueprint) -> Entity {
    ecs.spawn((
        Station,
        ShipIdentity {
            class: blueprint.class,
            alive: true,
        },
        Pose::at(station_home()),
        Spin {
            rate: STATION_ROTATION_SPEED,
        },
    ))
}

/// Where the station sits after docking or arriving in a system.
pub fn station_home() -> DVec3 {
    DVec3::new(0.0, 0.0, -STATION_DISTANCE)
}

/// Spawn one roaming ship with a full hull and an idle brain.
pub fn spawn_ship(ecs: &mut World, blueprint: &ShipBlueprint, pose: Pose) -> Entity {
    ecs.spawn((
        NpcShip,
        ShipIdentity {
            class: blueprint.class,
            alive: true,
        },
        pose,
        Motion {
            max_speed: blueprint.max_speed,
            ..Default::default()
        },
        blueprint.hull(),
        AiBrain::default(),
    ))
}

/// Spawn `count` random spawnable ships around the player, 500 to 1000 units out
/// in random directions and with random attitudes.
pub fn spawn_npc_ships(
    world: &mut GameWorld,
    catalog: &ShipCatalog,
    rng: &mut ChaCha8Rng,
    count: usize,
) -> Vec<Entity> {
    let classes = catalog.spawnable();
    if classes.is_empty() {
        log::warn!("no spawnable ships in catalog; skipping spawn of {count}");
        return Vec::new();
    }
    let center = world.position(world.player).unwrap_or(DVec3::ZERO);

    let mut spawned = Vec::with_capacity(count);
    for _ in 0..count {
        let class = classes[rng.gen_range(0..classes.len())];
        let Some(bp) = catalog.get(class) else {
            continue;
        };
        let direction = random_direction(rng);
        let distance = SPAWN_DISTANCE_MIN + rng.gen::<f64>() * SPAWN_DISTANCE_JITTER;
        let pose = Pose::new(center + direction * distance, random_orientation(rng));
        spawned.push(spawn_ship(&mut world.ecs, bp, pose));
    }
    log::debug!("spawned {} ships around {center}", spawned.len());
    spawned
}

pub fn random_direction(rng: &mut ChaCha8Rng) -> DVec3 {
    direction_from_samples(rng.gen(), rng.gen(), rng.gen())
}

pub fn random_orientation(rng: &mut ChaCha8Rng) -> DQuat {
    let tau = std::f64::consts::TAU;
    DQuat::from_euler(
        EulerRot::XYZ,
        rng.gen::<f64>() * tau,
        rng.gen::<f64>() * tau,
        rng.gen::<f64>() * tau,
    )
}
