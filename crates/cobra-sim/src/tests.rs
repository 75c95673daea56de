//! Tests for the simulation engine, combat, lifecycle, navigation and AI systems.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::{DQuat, DVec3};
use hecs::Entity;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use cobra_ai::tuning::AiTuning;
use cobra_core::blueprints::ShipCatalog;
use cobra_core::commands::{ControlState, PlayerCommand};
use cobra_core::components::*;
use cobra_core::constants::*;
use cobra_core::enums::*;
use cobra_core::error::ConfigError;
use cobra_core::events::{AudioEvent, Feedback, VisualEvent};

use crate::engine::{SimConfig, SimulationEngine};
use crate::pilot::{Pilot, Shields};
use crate::scheduler::{DeferredEffect, Scheduler};
use crate::systems::ai::{self, AiPass};
use crate::systems::damage::{self, DamageOutcome};
use crate::systems::{
    beams, collision, controls, effects, kinematics, missiles, navigation, regen, scanner, weapons,
};
use crate::world::GameWorld;
use crate::world_setup;

/// Frame delta under the clamp that sums exactly in binary floating point
/// (16 frames = 1 s).
const DT: f64 = 0.0625;

// ---- Helpers ----

/// A world with no roaming ships and the player flying at the origin.
fn flying_world() -> GameWorld {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut world = world_setup::build_world(&ShipCatalog::default(), &mut rng, 0).unwrap();
    world.pilot.docked = false;
    world.pilot.condition = Condition::Green;
    world
}

fn spawn(world: &mut GameWorld, class: ShipClass, position: DVec3, orientation: DQuat) -> Entity {
    let catalog = ShipCatalog::default();
    let bp = catalog.get(class).unwrap();
    world_setup::spawn_ship(&mut world.ecs, bp, Pose::new(position, orientation))
}

fn set_player(world: &mut GameWorld, position: DVec3, speed: f64) {
    let (pose, motion) = world
        .ecs
        .query_one_mut::<(&mut Pose, &mut Motion)>(world.player)
        .unwrap();
    pose.position = position;
    motion.speed = speed;
}

fn set_speed(world: &mut GameWorld, entity: Entity, speed: f64) {
    world.ecs.get::<&mut Motion>(entity).unwrap().speed = speed;
}

fn hull_energy(world: &GameWorld, ship: Entity) -> f64 {
    world.ecs.get::<&Hull>(ship).unwrap().energy
}

fn count<C: hecs::Component>(world: &GameWorld) -> usize {
    world.ecs.query::<&C>().iter().count()
}

/// AI that never moves, turns or attacks on its own.
fn quiet_tuning() -> AiTuning {
    AiTuning {
        idle_jitter: 0.0,
        idle_speed_change_chance: 0.0,
        attack_chance: 0.0,
        ..AiTuning::default()
    }
}

fn engine_with(spawn_count: usize) -> SimulationEngine {
    SimulationEngine::new(SimConfig {
        spawn_count,
        ..Default::default()
    })
    .unwrap()
}

/// Engine with an empty sky, launched from the station and one frame in.
fn launched_engine() -> SimulationEngine {
    let mut engine = engine_with(0);
    engine.set_tuning(quiet_tuning());
    engine.queue_command(PlayerCommand::Launch);
    engine.tick(DT);
    engine
}

fn hold(controls: ControlState) -> PlayerCommand {
    PlayerCommand::SetControls { controls }
}

fn firing() -> ControlState {
    ControlState {
        fire_laser: true,
        ..Default::default()
    }
}

// ---- Invariants ----

proptest! {
    #[test]
    fn orientation_stays_unit_length(
        steps in prop::collection::vec((-PI..PI, -PI..PI, 0.0f64..50.0, 0.0f64..0.1), 1..200)
    ) {
        let mut pose = Pose::at(DVec3::ZERO);
        let mut motion = Motion { max_speed: 50.0, ..Default::default() };
        for (roll, pitch, speed, dt) in steps {
            motion.roll_rate = roll;
            motion.pitch_rate = pitch;
            motion.speed = speed;
            kinematics::advance(&mut pose, &mut motion, dt);
            prop_assert!((pose.orientation.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn player_shields_and_energy_stay_in_bounds(
        events in prop::collection::vec((any::<bool>(), 0.0f64..600.0), 1..100)
    ) {
        let mut world = flying_world();
        let player = world.player;
        let mut scheduler = Scheduler::new();
        let mut feedback = Feedback::default();
        for (hit, amount) in events {
            if hit {
                damage::apply_damage(&mut world, player, amount, false, &mut scheduler, &mut feedback);
            } else {
                regen::run(&mut world.pilot, amount / 10.0);
            }
            let pilot = &world.pilot;
            prop_assert!((0.0..=MAX_ENERGY).contains(&pilot.energy));
            prop_assert!((0.0..=MAX_SHIELDS).contains(&pilot.shields.fore));
            prop_assert!((0.0..=MAX_SHIELDS).contains(&pilot.shields.aft));
        }
    }

    #[test]
    fn ship_energy_stays_in_bounds(hits in prop::collection::vec(0.0f64..50.0, 1..50)) {
        let mut world = flying_world();
        let ship = spawn(&mut world, ShipClass::Mamba, DVec3::new(0.0, 0.0, 300.0), DQuat::IDENTITY);
        let mut scheduler = Scheduler::new();
        let mut feedback = Feedback::default();
        for amount in hits {
            damage::apply_damage(&mut world, ship, amount, true, &mut scheduler, &mut feedback);
            let hull = *world.ecs.get::<&Hull>(ship).unwrap();
            prop_assert!(hull.energy >= 0.0 && hull.energy <= hull.max_energy);
        }
    }
}

// ---- Kinematics ----

#[test]
fn test_kinematics_moves_along_nose_and_damps_rates() {
    let mut world = flying_world();
    let ship = spawn(&mut world, ShipClass::Krait, DVec3::ZERO, DQuat::from_rotation_y(FRAC_PI_2));
    {
        let mut motion = world.ecs.get::<&mut Motion>(ship).unwrap();
        motion.speed = 8.0;
        motion.roll_rate = 1.0;
    }

    kinematics::run(&mut world.ecs, DT);

    // Rolling about the nose leaves the heading (+X) unchanged.
    assert!(world.position(ship).unwrap().distance(DVec3::new(0.5, 0.0, 0.0)) < 1e-9);
    let motion = *world.ecs.get::<&Motion>(ship).unwrap();
    assert_eq!(motion.roll_rate, ROTATION_DAMPING);
    assert_eq!(motion.speed, 8.0);
}

#[test]
fn test_pitch_turns_the_nose() {
    let mut pose = Pose::at(DVec3::ZERO);
    let mut motion = Motion {
        pitch_rate: FRAC_PI_2,
        ..Default::default()
    };
    kinematics::advance(&mut pose, &mut motion, 1.0);

    // Positive pitch about the port axis drops the nose toward -Y.
    let nose = pose.orientation * DVec3::Z;
    assert!(nose.distance(-DVec3::Y) < 1e-9);
}

// ---- Damage ----

#[test]
fn test_shields_absorb_evenly() {
    let mut world = flying_world();
    world.pilot.shields = Shields { fore: 10.0, aft: 10.0 };
    let player = world.player;

    let outcome = damage::apply_damage(
        &mut world,
        player,
        15.0,
        false,
        &mut Scheduler::new(),
        &mut Feedback::default(),
    );

    assert_eq!(outcome, DamageOutcome::Absorbed);
    assert_eq!(world.pilot.shields, Shields { fore: 2.5, aft: 2.5 });
    assert_eq!(world.pilot.energy, MAX_ENERGY);
}

#[test]
fn test_damage_beyond_shields_drains_energy() {
    let mut world = flying_world();
    world.pilot.shields = Shields { fore: 10.0, aft: 10.0 };
    let player = world.player;

    damage::apply_damage(
        &mut world,
        player,
        30.0,
        false,
        &mut Scheduler::new(),
        &mut Feedback::default(),
    );

    assert_eq!(world.pilot.shields, Shields { fore: 0.0, aft: 0.0 });
    assert_eq!(world.pilot.energy, MAX_ENERGY - 10.0);
    assert_eq!(world.pilot.condition, Condition::Green);
}

#[test]
fn test_player_death_schedules_single_respawn() {
    let mut world = flying_world();
    world.pilot.shields = Shields { fore: 0.0, aft: 0.0 };
    world.pilot.energy = 5.0;
    let player = world.player;
    let mut scheduler = Scheduler::new();
    let mut feedback = Feedback::default();

    let outcome = damage::apply_damage(&mut world, player, 10.0, false, &mut scheduler, &mut feedback);
    assert_eq!(outcome, DamageOutcome::Destroyed);
    assert_eq!(world.pilot.energy, 0.0);
    assert_eq!(world.pilot.condition, Condition::Dead);
    assert!(feedback.audio.contains(&AudioEvent::PlayerDeath));

    // More damage while dead does not queue a second respawn.
    damage::apply_damage(&mut world, player, 10.0, false, &mut scheduler, &mut feedback);
    assert_eq!(scheduler.len(), 1);
    assert!(scheduler.is_pending(|e| *e == DeferredEffect::RespawnPlayer));
}

#[test]
fn test_npc_destruction_marks_dead_and_schedules_removal() {
    let mut world = flying_world();
    let ship = spawn(&mut world, ShipClass::Krait, DVec3::new(0.0, 0.0, 300.0), DQuat::IDENTITY);
    let mut scheduler = Scheduler::new();
    let mut feedback = Feedback::default();

    let outcome = damage::apply_damage(&mut world, ship, 500.0, true, &mut scheduler, &mut feedback);

    assert_eq!(outcome, DamageOutcome::Destroyed);
    assert_eq!(hull_energy(&world, ship), 0.0);
    assert!(!world.is_alive(ship));
    assert!(world.ecs.contains(ship), "destroyed ship stays registered");
    assert!(feedback.audio.contains(&AudioEvent::Explosion));
    assert!(matches!(
        feedback.visuals[0],
        VisualEvent::Explosion { particles: 30, .. }
    ));

    // A destroyed ship ignores further damage.
    let again = damage::apply_damage(&mut world, ship, 10.0, true, &mut scheduler, &mut feedback);
    assert_eq!(again, DamageOutcome::Ignored);
    assert_eq!(scheduler.len(), 1);
}

#[test]
fn test_removal_of_vanished_ship_is_noop() {
    let mut world = flying_world();
    let ship = spawn(&mut world, ShipClass::Python, DVec3::new(0.0, 0.0, 300.0), DQuat::IDENTITY);
    let mut scheduler = Scheduler::new();
    let mut feedback = Feedback::default();

    damage::apply_damage(&mut world, ship, 1000.0, true, &mut scheduler, &mut feedback);
    world.ecs.despawn(ship).unwrap();

    scheduler.advance_to(SHIP_REMOVAL_DELAY_SECS);
    assert_eq!(effects::run(&mut world, &mut scheduler, &mut feedback), 1);
    assert_eq!(world.pilot.cash, STARTING_CASH);
    assert!(feedback.notifications.is_empty());
}

// ---- Scheduler ----

#[test]
fn test_scheduler_orders_by_due_time_then_fifo() {
    let mut world = flying_world();
    let a = world.ecs.spawn((HitMarker { position: DVec3::ZERO },));
    let b = world.ecs.spawn((HitMarker { position: DVec3::ZERO },));
    let c = world.ecs.spawn((HitMarker { position: DVec3::ZERO },));

    let mut scheduler = Scheduler::new();
    scheduler.schedule_after(1.0, DeferredEffect::ExpireHitMarker { marker: a });
    scheduler.schedule_after(0.5, DeferredEffect::ExpireHitMarker { marker: b });
    scheduler.schedule_after(0.5, DeferredEffect::ExpireHitMarker { marker: c });

    assert_eq!(scheduler.pop_due(), None);
    scheduler.advance_to(1.0);
    assert_eq!(scheduler.pop_due(), Some(DeferredEffect::ExpireHitMarker { marker: b }));
    assert_eq!(scheduler.pop_due(), Some(DeferredEffect::ExpireHitMarker { marker: c }));
    assert_eq!(scheduler.pop_due(), Some(DeferredEffect::ExpireHitMarker { marker: a }));
    assert!(scheduler.is_empty());
}

#[test]
fn test_scheduler_clock_never_runs_backwards() {
    let mut scheduler = Scheduler::new();
    scheduler.advance_to(2.0);
    scheduler.advance_to(1.0);
    assert_eq!(scheduler.now(), 2.0);
}

// ---- Weapons ----

#[test]
fn test_hit_damage_falloff() {
    assert_eq!(weapons::hit_damage(2.0, 30.0), None);
    assert_eq!(weapons::hit_damage(2.0, 0.0), Some(20.0));
    assert_eq!(weapons::hit_damage(2.0, 15.0), Some(10.0));
}

#[test]
fn test_closest_approach_ignores_targets_behind() {
    let origin = DVec3::ZERO;
    assert!(weapons::closest_approach(origin, DVec3::Z, DVec3::new(0.0, 0.0, -10.0)).is_none());

    let (point, miss) = weapons::closest_approach(origin, DVec3::Z, DVec3::new(3.0, 4.0, 100.0)).unwrap();
    assert_eq!(point, DVec3::new(0.0, 0.0, 100.0));
    assert_eq!(miss, 5.0);
}

#[test]
fn test_player_laser_hits_ship_ahead() {
    let mut world = flying_world();
    let player = world.player;
    let ship = spawn(&mut world, ShipClass::Sidewinder, DVec3::new(0.0, 0.0, 200.0), DQuat::IDENTITY);
    let mut scheduler = Scheduler::new();
    let mut feedback = Feedback::default();

    let report = weapons::fire(&mut world, player, &mut scheduler, &mut feedback).unwrap();

    assert_eq!(report.laser_power, 2.0);
    assert_eq!(report.beams.len(), 2);
    assert_eq!(report.hits.len(), 1);
    assert_eq!(report.hits[0].target, ship);
    assert_eq!(report.hits[0].damage, 20.0);
    assert_eq!(hull_energy(&world, ship), 50.0);
    assert_eq!(world.pilot.energy, MAX_ENERGY - 2.0);
    assert_eq!(count::<HitMarker>(&world), 1);
    assert!(feedback.audio.contains(&AudioEvent::Laser { from_player: true }));
    assert!(scheduler.is_pending(|e| matches!(e, DeferredEffect::ExpireHitMarker { .. })));
}

#[test]
fn test_laser_ignores_targets_out_of_range_or_behind() {
    let mut world = flying_world();
    let player = world.player;
    spawn(&mut world, ShipClass::Adder, DVec3::new(0.0, 0.0, 1001.0), DQuat::IDENTITY);
    spawn(&mut world, ShipClass::Adder, DVec3::new(0.0, 0.0, -200.0), DQuat::IDENTITY);
    spawn(&mut world, ShipClass::Adder, DVec3::new(30.0, 0.0, 200.0), DQuat::IDENTITY);

    let report = weapons::fire(&mut world, player, &mut Scheduler::new(), &mut Feedback::default())
        .unwrap();
    assert!(report.hits.is_empty());
}

#[test]
fn test_unpowered_mount_does_not_fire() {
    let mut world = flying_world();
    let player = world.player;
    world.pilot.view = ViewDirection::Rear;
    let mut feedback = Feedback::default();

    assert!(weapons::fire(&mut world, player, &mut Scheduler::new(), &mut feedback).is_none());
    assert_eq!(world.pilot.energy, MAX_ENERGY);
    assert_eq!(count::<LaserBeam>(&world), 0);
    assert!(feedback.is_empty());
}

#[test]
fn test_rear_view_fires_backwards() {
    let mut world = flying_world();
    let player = world.player;
    world.pilot.view = ViewDirection::Rear;
    world.pilot.laser_mounts[ViewDirection::Rear.index()] = 4.0;
    let ship = spawn(&mut world, ShipClass::Gecko, DVec3::new(0.0, 0.0, -200.0), DQuat::IDENTITY);

    let report = weapons::fire(&mut world, player, &mut Scheduler::new(), &mut Feedback::default())
        .unwrap();
    assert!(report.direction.distance(-DVec3::Z) < 1e-12);
    assert_eq!(report.hits.len(), 1);
    assert_eq!(report.hits[0].target, ship);
}

#[test]
fn test_npc_laser_hits_flying_player_but_not_docked() {
    let mut world = flying_world();
    let facing_player = DQuat::from_rotation_y(PI);
    let ship = spawn(&mut world, ShipClass::Viper, DVec3::new(0.0, 0.0, 100.0), facing_player);
    let mut scheduler = Scheduler::new();
    let mut feedback = Feedback::default();

    let report = weapons::fire(&mut world, ship, &mut scheduler, &mut feedback).unwrap();
    assert_eq!(report.beams.len(), 1);
    assert_eq!(report.hits.len(), 1);
    assert_eq!(report.hits[0].target, world.player);
    assert!((world.pilot.shields.fore - (MAX_SHIELDS - 10.0)).abs() < 1e-9);
    assert!((world.pilot.shields.aft - (MAX_SHIELDS - 10.0)).abs() < 1e-9);
    assert!(feedback.audio.contains(&AudioEvent::Laser { from_player: false }));

    world.pilot.docked = true;
    let report = weapons::fire(&mut world, ship, &mut scheduler, &mut feedback).unwrap();
    assert!(report.hits.is_empty());
}

#[test]
fn test_destroyed_ship_cannot_fire() {
    let mut world = flying_world();
    let ship = spawn(&mut world, ShipClass::Viper, DVec3::new(0.0, 0.0, 100.0), DQuat::IDENTITY);
    world.ecs.get::<&mut ShipIdentity>(ship).unwrap().alive = false;

    assert!(weapons::fire(&mut world, ship, &mut Scheduler::new(), &mut Feedback::default()).is_none());
}

// ---- Beams ----

#[test]
fn test_beams_are_drawn_then_expire() {
    let mut world = flying_world();
    let player = world.player;
    let mut buffer = Vec::new();
    weapons::fire(&mut world, player, &mut Scheduler::new(), &mut Feedback::default()).unwrap();

    assert_eq!(count::<LaserBeam>(&world), 2);

    beams::run(&mut world.ecs, DT, &mut buffer);
    assert_eq!(count::<LaserBeam>(&world), 2);

    beams::run(&mut world.ecs, DT, &mut buffer);
    assert_eq!(count::<LaserBeam>(&world), 0);
}

#[test]
fn test_beams_removed_once_lifetime_runs_out() {
    let mut world = flying_world();
    let player = world.player;
    let mut buffer = Vec::new();
    weapons::fire(&mut world, player, &mut Scheduler::new(), &mut Feedback::default()).unwrap();

    // A full lifetime in one step leaves exactly zero, which already counts as expired.
    beams::run(&mut world.ecs, LASER_LIFETIME_SECS, &mut buffer);
    assert_eq!(count::<LaserBeam>(&world), 0);
}

// ---- Collisions ----

#[test]
fn test_ship_collision_pushes_pair_apart() {
    let mut world = flying_world();
    let ship = spawn(&mut world, ShipClass::Asp, DVec3::new(30.0, 0.0, 0.0), DQuat::IDENTITY);
    set_speed(&mut world, ship, 4.0);
    let mut scheduler = Scheduler::new();
    let mut feedback = Feedback::default();

    let report = collision::run(&mut world, &mut scheduler, &mut feedback);

    assert_eq!(report.ship_contacts, vec![(ship, 20.0)]);
    let player_pos = world.position(world.player).unwrap();
    let ship_pos = world.position(ship).unwrap();
    assert!((player_pos.distance(ship_pos) - 50.0).abs() < 1e-9);
    assert_eq!(world.pilot.energy, MAX_ENERGY);
    assert!(world.pilot.shields.total() < 2.0 * MAX_SHIELDS);
    assert!(feedback.audio.contains(&AudioEvent::Collision));
}

#[test]
fn test_collision_kill_pays_no_bounty() {
    let mut world = flying_world();
    let ship = spawn(&mut world, ShipClass::Mamba, DVec3::new(0.0, 20.0, 0.0), DQuat::IDENTITY);
    world.ecs.get::<&mut Hull>(ship).unwrap().energy = 1.0;
    set_speed(&mut world, ship, 10.0);
    let mut scheduler = Scheduler::new();
    let mut feedback = Feedback::default();

    collision::run(&mut world, &mut scheduler, &mut feedback);
    assert!(!world.is_alive(ship));

    scheduler.advance_to(SHIP_REMOVAL_DELAY_SECS);
    effects::run(&mut world, &mut scheduler, &mut feedback);
    assert!(!world.ecs.contains(ship));
    assert_eq!(world.pilot.cash, STARTING_CASH);
}

#[test]
fn test_destroyed_ships_do_not_collide() {
    let mut world = flying_world();
    let ship = spawn(&mut world, ShipClass::Mamba, DVec3::new(10.0, 0.0, 0.0), DQuat::IDENTITY);
    world.ecs.get::<&mut ShipIdentity>(ship).unwrap().alive = false;

    let report = collision::run(&mut world, &mut Scheduler::new(), &mut Feedback::default());
    assert!(report.ship_contacts.is_empty());
}

#[test]
fn test_station_docking_window_and_impact() {
    let mut world = flying_world();
    let station = world.position(world.station).unwrap();

    set_player(&mut world, station + DVec3::new(0.0, 0.0, 40.0), 2.0);
    let report = collision::run(&mut world, &mut Scheduler::new(), &mut Feedback::default());
    assert!(report.docking_window);
    assert_eq!(report.station_impact, None);
    assert!(navigation::can_dock(&world));

    set_player(&mut world, station + DVec3::new(0.0, 0.0, 100.0), 10.0);
    let report = collision::run(&mut world, &mut Scheduler::new(), &mut Feedback::default());
    assert!(!report.docking_window);
    assert_eq!(report.station_impact, Some(60.0));
}

// ---- Controls, regen, missiles, scanner ----

#[test]
fn test_controls_steer_and_throttle() {
    let mut motion = Motion {
        max_speed: 1.0,
        roll_rate: 1.0,
        pitch_rate: 1.0,
        ..Default::default()
    };
    let keys = ControlState {
        roll_left: true,
        pitch_down: true,
        speed_up: true,
        ..Default::default()
    };
    controls::steer(&mut motion, &keys, DT);
    assert_eq!(motion.roll_rate, -FRAC_PI_2);
    assert_eq!(motion.pitch_rate, FRAC_PI_2);
    assert_eq!(motion.speed, 0.625);

    controls::steer(&mut motion, &keys, DT);
    assert_eq!(motion.speed, 1.0, "throttle caps at max speed");

    controls::steer(&mut motion, &ControlState::default(), DT);
    assert_eq!(motion.roll_rate, -FRAC_PI_2 * ROTATION_DAMPING);
    assert_eq!(motion.speed, INERTIAL_DAMPING);

    let brake = ControlState {
        speed_down: true,
        ..Default::default()
    };
    controls::steer(&mut motion, &brake, 1.0);
    assert_eq!(motion.speed, 0.0);
}

#[test]
fn test_regen_caps_and_skips_dead_pilot() {
    let mut pilot = Pilot {
        shields: Shields { fore: 100.0, aft: 254.9 },
        energy: 254.5,
        ..Default::default()
    };
    regen::run(&mut pilot, 1.0);
    assert_eq!(pilot.shields.fore, 100.5);
    assert_eq!(pilot.shields.aft, MAX_SHIELDS);
    assert_eq!(pilot.energy, MAX_ENERGY);

    pilot.condition = Condition::Dead;
    pilot.energy = 0.0;
    regen::run(&mut pilot, 1.0);
    assert_eq!(pilot.energy, 0.0);
    assert_eq!(pilot.shields.fore, 100.5);
}

#[test]
fn test_missile_arm_launch_unarm() {
    let mut pilot = Pilot::default();
    let mut feedback = Feedback::default();

    assert!(!missiles::launch(&mut pilot, &mut feedback), "nothing armed");
    assert!(missiles::arm(&mut pilot, &mut feedback));
    assert!(!missiles::arm(&mut pilot, &mut feedback), "already armed");
    assert!(missiles::launch(&mut pilot, &mut feedback));
    assert_eq!(pilot.missiles, STARTING_MISSILES - 1);
    assert!(!pilot.missile_armed);
    assert_eq!(
        feedback.audio,
        vec![AudioEvent::MissileArmed, AudioEvent::MissileLaunched]
    );

    assert!(missiles::arm(&mut pilot, &mut feedback));
    assert!(missiles::unarm(&mut pilot));
    assert!(!missiles::unarm(&mut pilot));
    assert_eq!(pilot.missiles, STARTING_MISSILES - 1);

    pilot.missiles = 0;
    assert!(!missiles::arm(&mut pilot, &mut feedback));
}

#[test]
fn test_scanner_projection() {
    let viewer = Pose::at(DVec3::ZERO);

    let behind = scanner::project(&viewer, DVec3::new(0.0, 0.0, -500.0));
    assert!(!behind.in_front);
    assert_eq!((behind.x, behind.y), (0.0, 0.0));

    let ahead = scanner::project(&viewer, DVec3::new(100.0, 50.0, 200.0));
    assert!(ahead.in_front);
    assert_eq!((ahead.x, ahead.y), (0.5, 0.25));

    let abeam = scanner::project(&viewer, DVec3::new(1000.0, -1000.0, 0.0));
    assert_eq!((abeam.x, abeam.y), (1.0, -1.0));
}

// ---- AI system ----

#[test]
fn test_attacker_loses_dead_player() {
    let mut world = flying_world();
    let ship = spawn(&mut world, ShipClass::Krait, DVec3::new(0.0, 0.0, 200.0), DQuat::IDENTITY);
    {
        let mut brain = world.ecs.get::<&mut AiBrain>(ship).unwrap();
        brain.state = AiState::Attacking;
        brain.target = Some(world.player);
    }
    world.pilot.condition = Condition::Dead;
    let tuning = AiTuning::default();
    let pass = AiPass {
        dt: DT,
        tuning: &tuning,
        respawn_distance: SHIP_RESPAWN_DISTANCE,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let decision = ai::update(
        &mut world,
        ship,
        &pass,
        &mut rng,
        &mut Scheduler::new(),
        &mut Feedback::default(),
    )
    .unwrap();

    assert_eq!(decision.new_state, AiState::Idle);
    let brain = *world.ecs.get::<&AiBrain>(ship).unwrap();
    assert_eq!(brain.state, AiState::Idle);
    assert_eq!(brain.target, None);
}

#[test]
fn test_straggler_is_tethered_back() {
    let mut world = flying_world();
    let ship = spawn(&mut world, ShipClass::Asp, DVec3::new(0.0, 2500.0, 0.0), DQuat::IDENTITY);
    world.ecs.get::<&mut AiBrain>(ship).unwrap().state = AiState::Fleeing;
    let tuning = AiTuning::default();
    let pass = AiPass {
        dt: DT,
        tuning: &tuning,
        respawn_distance: SHIP_RESPAWN_DISTANCE,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    ai::update(
        &mut world,
        ship,
        &pass,
        &mut rng,
        &mut Scheduler::new(),
        &mut Feedback::default(),
    );

    let distance = world.position(ship).unwrap().length();
    assert!((SHIP_RESPAWN_DISTANCE..SHIP_RESPAWN_DISTANCE + TETHER_DISTANCE_JITTER).contains(&distance));
    assert_eq!(world.ecs.get::<&AiBrain>(ship).unwrap().state, AiState::Idle);
}

#[test]
fn test_ai_regenerates_energy_and_skips_destroyed_ships() {
    let mut world = flying_world();
    let ship = spawn(&mut world, ShipClass::Sidewinder, DVec3::new(0.0, 0.0, 800.0), DQuat::IDENTITY);
    world.ecs.get::<&mut Hull>(ship).unwrap().energy = 10.0;
    let tuning = quiet_tuning();
    let pass = AiPass {
        dt: DT,
        tuning: &tuning,
        respawn_distance: SHIP_RESPAWN_DISTANCE,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut scheduler = Scheduler::new();
    let mut feedback = Feedback::default();

    assert!(ai::update(&mut world, ship, &pass, &mut rng, &mut scheduler, &mut feedback).is_some());
    assert_eq!(hull_energy(&world, ship), 10.0 + AI_ENERGY_REGEN_RATE * DT);

    world.ecs.get::<&mut ShipIdentity>(ship).unwrap().alive = false;
    assert!(ai::update(&mut world, ship, &pass, &mut rng, &mut scheduler, &mut feedback).is_none());
}

// ---- Navigation ----

#[test]
fn test_dock_and_launch() {
    let mut engine = launched_engine();
    assert!(!engine.pilot().docked);
    assert_eq!(engine.pilot().condition, Condition::Green);
    let player = engine.world().player;
    assert_eq!(
        engine.world().position(player),
        Some(DVec3::from_array(LAUNCH_POSITION))
    );

    // Too far away: ignored.
    engine.queue_command(PlayerCommand::Dock);
    engine.tick(DT);
    assert!(!engine.pilot().docked);

    set_player(engine.world_mut(), DVec3::new(0.0, 0.0, -470.0), 0.0);
    engine.queue_command(PlayerCommand::Dock);
    let snapshot = engine.tick(DT);
    assert!(snapshot.pilot.docked);
    assert_eq!(snapshot.pilot.condition, Condition::Docked);
    assert_eq!(engine.world().position(player), Some(DVec3::ZERO));
    assert_eq!(
        engine.world().position(engine.world().station),
        Some(world_setup::station_home())
    );

    engine.queue_commands([
        PlayerCommand::SetView {
            view: ViewDirection::Left,
        },
        PlayerCommand::Launch,
    ]);
    let snapshot = engine.tick(DT);
    assert!(!snapshot.pilot.docked);
    assert_eq!(snapshot.pilot.view, ViewDirection::Front);
}

#[test]
fn test_station_spins_about_its_axis() {
    let mut world = flying_world();
    let before = world.pose(world.station).unwrap();
    navigation::spin_station(&mut world.ecs, 1.0);
    let after = world.pose(world.station).unwrap();

    assert_eq!(after.position, before.position);
    assert!((after.orientation.angle_between(before.orientation) - STATION_ROTATION_SPEED).abs() < 1e-9);
}

#[test]
fn test_hyperspace_jump() {
    let mut engine = engine_with(3);
    let old_ships = engine.world().npc_ships();

    // Not while docked.
    engine.queue_command(PlayerCommand::Hyperspace);
    engine.tick(DT);
    assert_eq!(engine.pilot().current_system, 0);

    engine.queue_commands([
        PlayerCommand::Launch,
        PlayerCommand::SelectHyperspaceTarget { system: 99 },
        PlayerCommand::SelectHyperspaceTarget { system: 2 },
        PlayerCommand::Hyperspace,
    ]);
    let snapshot = engine.tick(DT);

    assert_eq!(snapshot.pilot.current_system, "Diso");
    assert_eq!(snapshot.pilot.fuel, MAX_FUEL - HYPERSPACE_FUEL_COST);
    assert!(snapshot.audio_events.contains(&AudioEvent::HyperspaceJump));
    assert!(snapshot
        .visual_events
        .iter()
        .any(|v| matches!(v, VisualEvent::HyperspaceJump { .. })));

    let new_ships = engine.world().npc_ships();
    assert_eq!(new_ships.len(), 3);
    assert!(old_ships.iter().all(|s| !engine.world().ecs.contains(*s)));
}

#[test]
fn test_hyperspace_needs_fuel() {
    let mut engine = launched_engine();
    engine.world_mut().pilot.fuel = HYPERSPACE_FUEL_COST - 1.0;
    engine.queue_command(PlayerCommand::Hyperspace);
    let snapshot = engine.tick(DT);
    assert_eq!(snapshot.pilot.current_system, "Lave");
    assert_eq!(snapshot.pilot.fuel, HYPERSPACE_FUEL_COST - 1.0);
}

// ---- Lifecycle through the engine ----

#[test]
fn test_player_kill_removed_after_one_second_with_bounty() {
    let mut engine = launched_engine();
    let ship = {
        let world = engine.world_mut();
        let ahead = world.position(world.player).unwrap() + DVec3::new(0.0, 0.0, 200.0);
        let ship = spawn(world, ShipClass::Sidewinder, ahead, DQuat::IDENTITY);
        world.ecs.get::<&mut Hull>(ship).unwrap().energy = 5.0;
        ship
    };

    engine.queue_command(hold(firing()));
    let snapshot = engine.tick(DT);
    assert!(!engine.world().is_alive(ship));
    assert!(snapshot.audio_events.contains(&AudioEvent::Explosion));
    assert_eq!(snapshot.beams.len(), 2);
    assert!(snapshot.beams.iter().all(|b| b.from_player));
    assert_eq!(snapshot.hit_markers.len(), 1);
    assert!(!snapshot.ships[0].alive);

    engine.queue_command(hold(ControlState::default()));
    for _ in 0..15 {
        engine.tick(DT);
        assert!(engine.world().ecs.contains(ship), "registered for a full second");
    }
    assert_eq!(engine.pilot().cash, STARTING_CASH);

    let snapshot = engine.tick(DT);
    assert!(!engine.world().ecs.contains(ship));
    assert!(snapshot.ships.is_empty());
    assert!(snapshot.hit_markers.is_empty());
    assert_eq!(engine.pilot().cash, STARTING_CASH + 50.0);
    assert_eq!(snapshot.notifications.len(), 1);
    assert_eq!(snapshot.notifications[0].message, "Bounty: +50 CR");
    assert!(snapshot.audio_events.contains(&AudioEvent::Bounty { amount: 50.0 }));
}

#[test]
fn test_player_respawns_three_seconds_after_death() {
    let mut engine = launched_engine();
    {
        let world = engine.world_mut();
        world.pilot.shields = Shields { fore: 0.0, aft: 0.0 };
        world.pilot.energy = 30.0;
        // Ram the station just behind the launch point.
        let player = world.player;
        set_speed(world, player, 10.0);
    }

    engine.tick(DT);
    assert_eq!(engine.pilot().condition, Condition::Dead);
    assert_eq!(engine.pilot().energy, 0.0);

    for _ in 0..47 {
        let snapshot = engine.tick(DT);
        assert_eq!(snapshot.pilot.condition, Condition::Dead);
    }

    let snapshot = engine.tick(DT);
    assert_eq!(snapshot.pilot.condition, Condition::Green);
    assert_eq!(snapshot.pilot.energy, MAX_ENERGY);
    assert_eq!(snapshot.pilot.shield_fore, MAX_SHIELDS);
    let player = engine.world().player;
    assert!(engine.world().position(player).unwrap().length() < 2.0);
}

#[test]
fn test_kill_timeline_at_clamped_frame_delta() {
    let mut engine = launched_engine();
    let ship = {
        let world = engine.world_mut();
        let ahead = world.position(world.player).unwrap() + DVec3::new(0.0, 0.0, 200.0);
        let ship = spawn(world, ShipClass::Sidewinder, ahead, DQuat::IDENTITY);
        world.ecs.get::<&mut Hull>(ship).unwrap().energy = 5.0;
        ship
    };

    engine.queue_command(hold(firing()));
    let snapshot = engine.tick(MAX_FRAME_DT);
    assert!(!engine.world().is_alive(ship));
    assert_eq!(snapshot.beams.len(), 2, "beams drawn on the frame they are fired");
    let killed_at = engine.time().elapsed_secs;

    engine.queue_command(hold(ControlState::default()));
    let snapshot = engine.tick(MAX_FRAME_DT);
    assert!(snapshot.beams.is_empty());

    while engine.world().ecs.contains(ship) {
        engine.tick(MAX_FRAME_DT);
        assert!(engine.time().elapsed_secs - killed_at < 1.0 + MAX_FRAME_DT + 1e-9);
    }
    assert!(engine.time().elapsed_secs - killed_at > 1.0 - 1e-9);
    assert_eq!(engine.pilot().cash, STARTING_CASH + 50.0);
}

#[test]
fn test_dead_player_cannot_dock() {
    let mut engine = launched_engine();
    {
        let world = engine.world_mut();
        world.pilot.condition = Condition::Dead;
        set_player(world, DVec3::new(0.0, 0.0, -480.0), 0.0);
    }
    engine.queue_command(PlayerCommand::Dock);
    engine.tick(DT);
    assert!(!engine.pilot().docked);
}

// ---- Orchestrator ----

#[test]
fn test_frame_delta_is_clamped() {
    let mut engine = engine_with(0);
    engine.tick(0.5);
    assert_eq!(engine.time().elapsed_secs, MAX_FRAME_DT);
    assert_eq!(engine.time().tick, 1);
}

#[test]
fn test_non_positive_delta_skips_frame() {
    let mut engine = engine_with(0);
    for dt in [0.0, -1.0, f64::NAN] {
        engine.tick(dt);
    }
    assert_eq!(engine.time().tick, 0);
    assert_eq!(engine.time().elapsed_secs, 0.0);
}

#[test]
fn test_commands_processed_on_skipped_frame() {
    let mut engine = engine_with(0);
    engine.queue_command(PlayerCommand::Launch);
    let snapshot = engine.tick(0.0);
    assert!(!snapshot.pilot.docked);
}

#[test]
fn test_pause_and_resume() {
    let mut engine = launched_engine();
    let elapsed = engine.time().elapsed_secs;

    engine.queue_command(PlayerCommand::Pause);
    let snapshot = engine.tick(DT);
    assert_eq!(snapshot.phase, GamePhase::Paused);
    assert_eq!(engine.time().elapsed_secs, elapsed);

    engine.queue_command(PlayerCommand::Resume);
    engine.tick(DT);
    assert_eq!(engine.phase(), GamePhase::Active);
    assert_eq!(engine.time().elapsed_secs, elapsed + DT);
}

#[test]
fn test_docked_frame_leaves_ships_still() {
    let mut engine = engine_with(3);
    let before = engine.tick(DT);
    let after = engine.tick(DT);
    for (a, b) in before.ships.iter().zip(&after.ships) {
        assert_eq!(a.position, b.position);
    }
}

#[test]
fn test_initial_snapshot() {
    let mut engine = engine_with(5);
    let snapshot = engine.tick(DT);

    assert!(snapshot.pilot.docked);
    assert_eq!(snapshot.pilot.condition, Condition::Docked);
    assert_eq!(snapshot.pilot.current_system, "Lave");
    assert_eq!(snapshot.pilot.hyperspace_target, "Riedquat");
    assert_eq!(snapshot.pilot.laser_power, 2.0);
    assert_eq!(snapshot.ships.len(), 5);
    assert!(snapshot.ships.windows(2).all(|w| w[0].id < w[1].id));
    for ship in &snapshot.ships {
        assert!(ship.alive);
        assert_eq!(ship.ai_state, Some(AiState::Idle));
        let d = ship.position.length();
        assert!((SPAWN_DISTANCE_MIN..SPAWN_DISTANCE_MIN + SPAWN_DISTANCE_JITTER).contains(&d));
    }
    assert_eq!(snapshot.player.as_ref().unwrap().ai_state, None);
    assert_eq!(snapshot.station.as_ref().unwrap().class, ShipClass::Coriolis);
    assert!(!snapshot.scanner.in_front);
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let run = || {
        let mut engine = SimulationEngine::new(SimConfig {
            seed: 12345,
            ..Default::default()
        })
        .unwrap();
        engine.queue_command(PlayerCommand::Launch);
        let mut out = Vec::new();
        for i in 0..300 {
            if i == 40 {
                engine.queue_command(hold(ControlState {
                    speed_up: true,
                    roll_left: true,
                    fire_laser: true,
                    ..Default::default()
                }));
            }
            out.push(serde_json::to_string(&engine.tick(1.0 / 60.0)).unwrap());
        }
        out
    };
    assert_eq!(run(), run(), "snapshots diverged with same seed");
}

#[test]
fn test_determinism_different_seeds() {
    let first = |seed| {
        let mut engine = SimulationEngine::new(SimConfig {
            seed,
            ..Default::default()
        })
        .unwrap();
        serde_json::to_string(&engine.tick(DT).ships).unwrap()
    };
    assert_ne!(first(111), first(222));
}

// ---- Configuration ----

#[test]
fn test_config_json_defaults_and_errors() {
    let config = SimConfig::from_json(r#"{ "seed": 9 }"#).unwrap();
    assert_eq!(config.seed, 9);
    assert_eq!(config.spawn_count, SHIP_AI_SPAWN_COUNT);
    assert_eq!(config.respawn_distance, SHIP_RESPAWN_DISTANCE);

    assert!(matches!(SimConfig::from_json("{"), Err(ConfigError::Json(_))));
    assert!(matches!(
        SimConfig::from_json(r#"{ "time_scale": 0.0 }"#),
        Err(ConfigError::NonPositive { field: "time_scale", .. })
    ));
}

#[test]
fn test_engine_rejects_catalog_without_station() {
    let mut catalog = ShipCatalog::default();
    catalog.blueprints.retain(|b| b.class != ShipClass::Coriolis);
    let result = SimulationEngine::new(SimConfig {
        catalog,
        ..Default::default()
    });
    assert!(matches!(
        result,
        Err(ConfigError::MissingBlueprint(ShipClass::Coriolis))
    ));
}
