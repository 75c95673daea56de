//! Flight controls: turns held keys into the player's motion intents.

use cobra_core::commands::ControlState;
use cobra_core::components::Motion;
use cobra_core::constants::*;

use crate::world::GameWorld;

/// Apply the held flight keys to the player ship.
pub fn run(world: &mut GameWorld, controls: &ControlState, dt: f64) {
    if let Ok(mut motion) = world.ecs.get::<&mut Motion>(world.player) {
        steer(&mut motion, controls, dt);
    }
}

/// Roll and pitch keys set full-rate turns; released axes damp out. The
/// throttle keys accelerate within `0..=max_speed`; with neither held the
/// ship coasts down slowly.
pub fn steer(motion: &mut Motion, controls: &ControlState, dt: f64) {
    motion.roll_rate = if controls.roll_left {
        -CONTROL_ROTATION_RATE
    } else if controls.roll_right {
        CONTROL_ROTATION_RATE
    } else {
        motion.roll_rate * ROTATION_DAMPING
    };

    motion.pitch_rate = if controls.pitch_up {
        -CONTROL_ROTATION_RATE
    } else if controls.pitch_down {
        CONTROL_ROTATION_RATE
    } else {
        motion.pitch_rate * ROTATION_DAMPING
    };

    motion.speed = if controls.speed_up {
        (motion.speed + CONTROL_ACCELERATION * dt).min(motion.max_speed)
    } else if controls.speed_down {
        (motion.speed - CONTROL_ACCELERATION * dt).max(0.0)
    } else {
        motion.speed * INERTIAL_DAMPING
    };
}
