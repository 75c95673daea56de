//! Laser fire and instant hit resolution.
//!
//! A shot is resolved the moment it is fired: every candidate within range
//! and ahead of the shooter is tested against the fire ray, and each one
//! passing close enough takes damage that falls off linearly with the miss
//! distance. Beam entities exist only so collaborators can draw the shot.

use glam::{DQuat, DVec3};
use hecs::Entity;

use cobra_core::components::{HitMarker, Hull, LaserBeam, NpcShip, Pose, ShipIdentity};
use cobra_core::constants::*;
use cobra_core::events::{AudioEvent, Feedback};
use cobra_core::types::{forward_of, FORWARD};

use crate::scheduler::{DeferredEffect, Scheduler};
use crate::systems::damage::{self, DamageOutcome};
use crate::world::GameWorld;

/// One target struck by a shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub target: Entity,
    pub miss_distance: f64,
    pub damage: f64,
    /// Closest point on the fire ray to the target.
    pub point: DVec3,
    pub outcome: DamageOutcome,
}

/// Summary of a shot that was actually fired.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FireReport {
    pub laser_power: f64,
    pub direction: DVec3,
    pub beams: Vec<Entity>,
    pub hits: Vec<Hit>,
}

/// Damage a dead-center hit at `miss_distance` would deal, or `None` for a miss.
pub fn hit_damage(laser_power: f64, miss_distance: f64) -> Option<f64> {
    if miss_distance < LASER_HIT_TOLERANCE {
        Some(laser_power * LASER_DAMAGE_PER_POWER * (1.0 - miss_distance / LASER_HIT_TOLERANCE))
    } else {
        None
    }
}

/// Closest point on the ray `origin + t * direction` (t ≥ 0) to `target` and
/// its distance, or `None` when the target is behind the origin.
pub fn closest_approach(origin: DVec3, direction: DVec3, target: DVec3) -> Option<(DVec3, f64)> {
    let projection = (target - origin).dot(direction);
    if projection < 0.0 {
        return None;
    }
    let closest = origin + direction * projection;
    Some((closest, closest.distance(target)))
}

/// Fire `shooter`'s laser.
///
/// Returns `None` without side effects when the laser is unpowered or the
/// shooter lacks the energy. The player fires the mount of the current view
/// as two parallel beams; other ships fire a single beam along their nose.
pub fn fire(
    world: &mut GameWorld,
    shooter: Entity,
    scheduler: &mut Scheduler,
    feedback: &mut Feedback,
) -> Option<FireReport> {
    let is_player = shooter == world.player;

    let Some(pose) = world.pose(shooter) else {
        log::error!("shooter {shooter:?} is not in the registry; shot aborted");
        return None;
    };

    let (laser_power, energy) = if is_player {
        (world.pilot.laser_power(), world.pilot.energy)
    } else {
        let hull = world.ecs.get::<&Hull>(shooter).ok().map(|h| *h)?;
        if !world.is_alive(shooter) {
            return None;
        }
        (hull.laser_power, hull.energy)
    };
    if laser_power <= 0.0 || energy < LASER_MIN_ENERGY {
        return None;
    }

    // Fire direction and muzzle positions.
    let (direction, muzzles) = if is_player {
        let aim = pose.orientation * DQuat::from_rotation_y(world.pilot.view.yaw());
        let muzzles = PLAYER_BEAM_OFFSETS
            .iter()
            .map(|o| pose.position + aim * DVec3::from_array(*o))
            .collect::<Vec<_>>();
        (aim * FORWARD, muzzles)
    } else {
        (forward_of(pose.orientation), vec![pose.position])
    };

    // Pay for the shot.
    if is_player {
        world.pilot.drain_energy(laser_power);
    } else if let Ok(mut hull) = world.ecs.get::<&mut Hull>(shooter) {
        hull.energy = (hull.energy - laser_power).max(0.0);
    }

    let beams: Vec<Entity> = muzzles
        .into_iter()
        .map(|origin| {
            world.ecs.spawn((LaserBeam {
                shooter,
                origin,
                direction,
                lifetime_secs: LASER_LIFETIME_SECS,
            },))
        })
        .collect();
    feedback.cue(AudioEvent::Laser {
        from_player: is_player,
    });

    // Candidates: every other living roaming ship, plus the player when an
    // NPC is shooting and the player can be hit.
    let mut candidates: Vec<(Entity, DVec3)> = world
        .ecs
        .query::<(&NpcShip, &ShipIdentity, &Pose)>()
        .iter()
        .filter(|(e, (_, id, _))| *e != shooter && id.alive)
        .map(|(e, (_, _, p))| (e, p.position))
        .collect();
    if !is_player && !world.pilot.docked && world.is_targetable(world.player) {
        if let Some(pos) = world.position(world.player) {
            candidates.push((world.player, pos));
        }
    }

    let mut hits = Vec::new();
    for (target, target_pos) in candidates {
        if pose.position.distance(target_pos) > LASER_RANGE {
            continue;
        }
        let Some((point, miss_distance)) = closest_approach(pose.position, direction, target_pos)
        else {
            continue;
        };
        let Some(amount) = hit_damage(laser_power, miss_distance) else {
            continue;
        };

        let outcome =
            damage::apply_damage(world, target, amount, is_player, scheduler, feedback);
        spawn_hit_marker(world, point, scheduler);
        hits.push(Hit {
            target,
            miss_distance,
            damage: amount,
            point,
            outcome,
        });
    }

    Some(FireReport {
        laser_power,
        direction,
        beams,
        hits,
    })
}

fn spawn_hit_marker(world: &mut GameWorld, position: DVec3, scheduler: &mut Scheduler) {
    let marker = world.ecs.spawn((HitMarker { position },));
    scheduler.schedule_after(
        HIT_MARKER_LIFETIME_SECS,
        DeferredEffect::ExpireHitMarker { marker },
    );
}
