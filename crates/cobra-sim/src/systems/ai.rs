//! Ship AI system: updates every roaming ship each tick.
//!
//! Calls the FSM from cobra-ai to decide the ship's intents, applies them to
//! the ECS components, fires when told to, and keeps ships tethered near the
//! player.

use hecs::Entity;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use cobra_ai::fsm::{evaluate, AiContext, AiUpdate, TargetChange};
use cobra_ai::tuning::AiTuning;
use cobra_core::components::{AiBrain, Hull, Motion, Pose};
use cobra_core::constants::{AI_ENERGY_REGEN_RATE, TETHER_DISTANCE_JITTER};
use cobra_core::enums::AiState;
use cobra_core::events::Feedback;

use crate::scheduler::Scheduler;
use crate::systems::{kinematics, weapons};
use crate::world::GameWorld;
use crate::world_setup::random_direction;

/// Shared inputs for one AI pass.
pub struct AiPass<'a> {
    pub dt: f64,
    pub tuning: &'a AiTuning,
    pub respawn_distance: f64,
}

/// Update every registered roaming ship, then integrate its motion.
/// Ships in their destruction window skip the brain but keep drifting.
pub fn run(
    world: &mut GameWorld,
    pass: &AiPass,
    rng: &mut ChaCha8Rng,
    scheduler: &mut Scheduler,
    feedback: &mut Feedback,
) {
    for ship in world.npc_ships() {
        update(world, ship, pass, rng, scheduler, feedback);
        kinematics::advance_entity(&mut world.ecs, ship, pass.dt);
    }
}

/// Run the brain of one ship. Returns the FSM's decision, or `None` when the
/// ship is gone or destroyed.
pub fn update(
    world: &mut GameWorld,
    ship: Entity,
    pass: &AiPass,
    rng: &mut ChaCha8Rng,
    scheduler: &mut Scheduler,
    feedback: &mut Feedback,
) -> Option<AiUpdate> {
    if !world.is_alive(ship) {
        return None;
    }
    let player_pos = world.position(world.player)?;

    let (mut ctx, target) = {
        let (hull, pose, motion, brain) = world
            .ecs
            .query_one_mut::<(&mut Hull, &Pose, &Motion, &AiBrain)>(ship)
            .ok()?;
        hull.energy = (hull.energy + AI_ENERGY_REGEN_RATE * pass.dt).min(hull.max_energy);

        let ctx = AiContext {
            state: brain.state,
            energy: hull.energy,
            max_energy: hull.max_energy,
            speed: motion.speed,
            max_speed: motion.max_speed,
            position: pose.position,
            orientation: pose.orientation,
            player_position: player_pos,
            player_docked: world.pilot.docked,
            target_position: None,
            distance: pose.position.distance(player_pos),
            dt: pass.dt,
        };
        (ctx, brain.target)
    };
    // The handle is weak: the target may be gone or destroyed by now.
    ctx.target_position = target
        .filter(|t| world.is_targetable(*t))
        .and_then(|t| world.position(t));

    let decision = evaluate(&ctx, pass.tuning, rng);
    apply(world, ship, &decision);

    if decision.fire {
        weapons::fire(world, ship, scheduler, feedback);
    }

    if ctx.distance > pass.respawn_distance * 2.0 {
        tether(world, ship, pass.respawn_distance, rng);
    }

    Some(decision)
}

fn apply(world: &mut GameWorld, ship: Entity, decision: &AiUpdate) {
    let player = world.player;
    let Ok((brain, motion, pose)) = world
        .ecs
        .query_one_mut::<(&mut AiBrain, &mut Motion, &mut Pose)>(ship)
    else {
        return;
    };

    if decision.state_changed {
        log::trace!("{ship:?}: {:?} -> {:?}", brain.state, decision.new_state);
    }
    brain.state = decision.new_state;
    match decision.target {
        TargetChange::Keep => {}
        TargetChange::AcquirePlayer => brain.target = Some(player),
        TargetChange::Clear => brain.target = None,
    }

    if let Some(rate) = decision.roll_rate {
        motion.roll_rate = rate;
    }
    if let Some(rate) = decision.pitch_rate {
        motion.pitch_rate = rate;
    }
    if let Some(speed) = decision.speed {
        motion.speed = speed;
    }
    if let Some(orientation) = decision.orientation {
        pose.orientation = orientation;
    }
}

/// Pull a straggler back to a random point near the player and calm it down.
fn tether(world: &mut GameWorld, ship: Entity, respawn_distance: f64, rng: &mut ChaCha8Rng) {
    let Some(player_pos) = world.position(world.player) else {
        return;
    };
    let direction = random_direction(rng);
    let distance = respawn_distance + rng.gen::<f64>() * TETHER_DISTANCE_JITTER;

    if let Ok((pose, brain)) = world.ecs.query_one_mut::<(&mut Pose, &mut AiBrain)>(ship) {
        pose.position = player_pos + direction * distance;
        brain.state = AiState::Idle;
        brain.target = None;
        log::trace!("{ship:?} tethered back to {distance:.0} units");
    }
}
