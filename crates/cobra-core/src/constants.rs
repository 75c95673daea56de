//! Simulation constants and tuning parameters.

use std::f64::consts::PI;

// --- Frame timing ---

/// Largest frame delta the orchestrator will integrate (seconds).
pub const MAX_FRAME_DT: f64 = 0.1;

// --- Kinematics ---

/// Multiplicative decay applied to roll and pitch rates every tick.
pub const ROTATION_DAMPING: f64 = 0.95;

// --- Flight controls ---

/// Roll/pitch rate while a rotation key is held (rad/s).
pub const CONTROL_ROTATION_RATE: f64 = PI / 2.0;

/// Throttle change while a speed key is held (units/s²).
pub const CONTROL_ACCELERATION: f64 = 10.0;

/// Speed decay when neither speed key is held.
pub const INERTIAL_DAMPING: f64 = 0.98;

// --- Lasers ---

/// Visual lifetime of a beam (seconds). Hit testing happens at fire time.
pub const LASER_LIFETIME_SECS: f64 = 0.1;

/// Beams only hit targets closer than this.
pub const LASER_RANGE: f64 = 1000.0;

/// Largest miss-distance that still registers a hit.
pub const LASER_HIT_TOLERANCE: f64 = 30.0;

/// Damage per unit of laser power for a dead-center hit.
pub const LASER_DAMAGE_PER_POWER: f64 = 10.0;

/// Minimum energy required to fire.
pub const LASER_MIN_ENERGY: f64 = 1.0;

/// Length of a rendered beam.
pub const BEAM_LENGTH: f64 = 1000.0;

/// Player beam muzzle offsets in the view frame (left and right guns).
pub const PLAYER_BEAM_OFFSETS: [[f64; 3]; 2] = [[-4.0, -2.0, 10.0], [4.0, -2.0, 10.0]];

/// How long a hit spark stays in the scene (seconds).
pub const HIT_MARKER_LIFETIME_SECS: f64 = 0.1;

// --- Player ---

/// Full shield value for each of the fore and aft pools.
pub const MAX_SHIELDS: f64 = 255.0;

/// Full player energy.
pub const MAX_ENERGY: f64 = 255.0;

/// Shield regeneration per pool (units/s).
pub const SHIELD_REGEN_RATE: f64 = 0.5;

/// Player energy regeneration (units/s).
pub const ENERGY_REGEN_RATE: f64 = 1.0;

/// Delay between player death and respawn (seconds).
pub const PLAYER_RESPAWN_DELAY_SECS: f64 = 3.0;

pub const STARTING_CASH: f64 = 100.0;
pub const MAX_FUEL: f64 = 70.0;
pub const STARTING_MISSILES: u32 = 3;

/// Laser power for the front, rear, left and right mounts at game start.
pub const STARTING_LASER_MOUNTS: [f64; 4] = [2.0, 0.0, 0.0, 0.0];

// --- Non-player ships ---

/// Delay between an NPC's death and its removal from the registry (seconds).
pub const SHIP_REMOVAL_DELAY_SECS: f64 = 1.0;

/// How long a bounty message stays on screen.
pub const BOUNTY_NOTIFICATION_MS: u32 = 3000;

pub const BOUNTY_NOTIFICATION_COLOR: &str = "#ff0";

/// Number of roaming ships spawned at start-up and after each jump.
pub const SHIP_AI_SPAWN_COUNT: usize = 5;

/// Reference radius for spawning and the tether safeguard.
pub const SHIP_RESPAWN_DISTANCE: f64 = 1000.0;

/// Fresh ships appear this far from the player, plus up to `SPAWN_DISTANCE_JITTER`.
pub const SPAWN_DISTANCE_MIN: f64 = 500.0;
pub const SPAWN_DISTANCE_JITTER: f64 = 500.0;

/// Extra random radius added to a tether relocation.
pub const TETHER_DISTANCE_JITTER: f64 = 500.0;

// --- Collisions ---

/// Player-to-ship contact distance.
pub const COLLISION_THRESHOLD: f64 = 50.0;

/// Player-to-station contact distance.
pub const STATION_COLLISION_RANGE: f64 = 150.0;

/// Base damage of a station collision, before adding speed.
pub const STATION_COLLISION_BASE_DAMAGE: f64 = 50.0;

/// Ship collisions deal closing speed times this factor to both parties.
pub const SHIP_COLLISION_DAMAGE_FACTOR: f64 = 5.0;

/// Distance each party is pushed after a ship collision.
pub const COLLISION_PUSH_DISTANCE: f64 = 10.0;

// --- Station and navigation ---

/// Station sits this far down -Z from the origin after docking or a jump.
pub const STATION_DISTANCE: f64 = 500.0;

/// Station roll rate (rad/s).
pub const STATION_ROTATION_SPEED: f64 = 0.05;

/// Docking requires being closer than this to the station...
pub const DOCKING_RANGE: f64 = 50.0;

/// ...and slower than this. Above it, contact is a collision.
pub const DOCKING_MAX_SPEED: f64 = 5.0;

/// Player position right after launch.
pub const LAUNCH_POSITION: [f64; 3] = [0.0, 0.0, -400.0];

/// Fuel burned by one hyperspace jump.
pub const HYPERSPACE_FUEL_COST: f64 = 10.0;

/// Star systems reachable by hyperspace.
pub const GALAXY: [&str; 5] = ["Lave", "Riedquat", "Diso", "Leesti", "Zaonce"];

// --- AI ---

/// Passive energy regeneration for NPCs (units/s).
pub const AI_ENERGY_REGEN_RATE: f64 = 0.5;

/// Half-width of the idle roll/pitch jitter (rad/s).
pub const AI_IDLE_JITTER: f64 = PI / 4.0;

/// Per-tick chance an idle ship picks a new cruise speed.
pub const AI_IDLE_SPEED_CHANGE_CHANCE: f64 = 0.01;

/// Idle cruise speed is at most this fraction of max speed.
pub const AI_IDLE_MAX_SPEED_FRACTION: f64 = 0.5;

/// Idle ships only consider attacking inside this range.
pub const AI_ATTACK_RANGE: f64 = 500.0;

/// Per-tick chance an idle ship in range starts an attack.
pub const AI_ATTACK_CHANCE: f64 = 0.005;

/// Target is considered behind when the heading error exceeds this.
pub const AI_EVADE_ANGLE: f64 = PI * 0.7;

/// Evasive hard-roll rate (rad/s).
pub const AI_EVADE_ROLL_RATE: f64 = PI;

/// Evasive pitch jitter scale.
pub const AI_EVADE_PITCH_SCALE: f64 = PI * 0.5;

/// Evasive manoeuvres slow down toward this fraction of max speed.
pub const AI_EVADE_SPEED_FRACTION: f64 = 0.3;

/// Throttle change while attacking (units/s²).
pub const AI_ATTACK_ACCELERATION: f64 = 2.0;

/// Deceleration while holding stand-off range (units/s²).
pub const AI_STANDOFF_DECELERATION: f64 = 1.0;

/// Attackers close in while farther than this.
pub const AI_STANDOFF_RANGE: f64 = 200.0;

/// Speed fraction held while inside stand-off range.
pub const AI_STANDOFF_SPEED_FRACTION: f64 = 0.5;

/// Scale of the steering roll jitter.
pub const AI_STEER_ROLL_SCALE: f64 = PI * 0.2;

/// Pitch gain applied to the target's local vertical offset.
pub const AI_STEER_PITCH_GAIN: f64 = PI;

/// Attackers only fire inside this range...
pub const AI_FIRE_RANGE: f64 = 300.0;

/// ...when the heading error is below this...
pub const AI_FIRE_ANGLE: f64 = PI * 0.2;

/// ...with this per-tick chance.
pub const AI_FIRE_CHANCE: f64 = 0.05;

/// Per-tick chance an attacker gives up.
pub const AI_GIVE_UP_CHANCE: f64 = 0.001;

/// Attackers give up beyond this range.
pub const AI_PURSUIT_RANGE: f64 = 1000.0;

/// Attackers flee below this fraction of max energy.
pub const AI_FLEE_ENERGY_FRACTION: f64 = 0.2;

/// Throttle change while fleeing (units/s²).
pub const AI_FLEE_ACCELERATION: f64 = 5.0;

/// Fleeing ships feel safe beyond this range...
pub const AI_SAFE_RANGE: f64 = 800.0;

/// ...or above this fraction of max energy...
pub const AI_RECOVERED_ENERGY_FRACTION: f64 = 0.6;

/// ...or with this per-tick chance.
pub const AI_CALM_DOWN_CHANCE: f64 = 0.01;
