//! Kinematic integration.
//!
//! Rotates each ship by its pitch and roll rates about its own axes, damps
//! the rates, then moves it along its nose at its current speed.

use hecs::{Entity, World};

use cobra_core::components::{Motion, Pose};
use cobra_core::constants::ROTATION_DAMPING;
use cobra_core::types::{forward_of, pitch_axis_of};

use glam::DQuat;

/// Advance one pose by `dt` seconds.
pub fn advance(pose: &mut Pose, motion: &mut Motion, dt: f64) {
    let pitch = DQuat::from_axis_angle(pitch_axis_of(pose.orientation), motion.pitch_rate * dt);
    let roll = DQuat::from_axis_angle(forward_of(pose.orientation), motion.roll_rate * dt);

    // Pitch first, then roll, both in world space.
    pose.orientation = (roll * (pitch * pose.orientation)).normalize();

    motion.roll_rate *= ROTATION_DAMPING;
    motion.pitch_rate *= ROTATION_DAMPING;

    pose.position += forward_of(pose.orientation) * motion.speed * dt;
}

/// Advance a single entity, if it has a pose and motion.
pub fn advance_entity(world: &mut World, entity: Entity, dt: f64) {
    if let Ok((pose, motion)) = world.query_one_mut::<(&mut Pose, &mut Motion)>(entity) {
        advance(pose, motion, dt);
    }
}

/// Advance every entity with Pose + Motion.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pose, motion)) in world.query_mut::<(&mut Pose, &mut Motion)>() {
        advance(pose, motion, dt);
    }
}
