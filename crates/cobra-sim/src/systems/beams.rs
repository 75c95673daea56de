//! Beam lifetime: removes laser beams once their display time is up.

use hecs::{Entity, World};

use cobra_core::components::LaserBeam;

/// Age every beam by `dt` and despawn those at or below zero.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, dt: f64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, beam) in world.query_mut::<&mut LaserBeam>() {
        beam.lifetime_secs -= dt;
        if beam.lifetime_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
