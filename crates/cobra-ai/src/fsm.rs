//! Ship behaviour finite state machine.
//!
//! Pure functions that compute state transitions and motion intents for one
//! non-player ship based on its current state and situation.
//! No ECS dependency; operates on plain data.

use glam::{DQuat, DVec3};

use cobra_core::enums::AiState;
use cobra_core::types::{angle_between, forward_of, FORWARD};

use crate::dice::Dice;
use crate::tuning::AiTuning;

/// Input to the FSM for a single ship.
#[derive(Debug, Clone, Copy)]
pub struct AiContext {
    pub state: AiState,
    pub energy: f64,
    pub max_energy: f64,
    pub speed: f64,
    pub max_speed: f64,
    pub position: DVec3,
    pub orientation: DQuat,
    pub player_position: DVec3,
    pub player_docked: bool,
    /// Position of the current target, if it is still registered and alive.
    pub target_position: Option<DVec3>,
    /// Distance to the player.
    pub distance: f64,
    pub dt: f64,
}

/// What to do with the ship's target handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetChange {
    Keep,
    AcquirePlayer,
    Clear,
}

/// Output from the FSM. `None` fields leave the ship's value untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiUpdate {
    pub new_state: AiState,
    pub state_changed: bool,
    pub target: TargetChange,
    pub roll_rate: Option<f64>,
    pub pitch_rate: Option<f64>,
    pub speed: Option<f64>,
    pub orientation: Option<DQuat>,
    /// Fire the forward laser at the target this tick.
    pub fire: bool,
}

impl AiUpdate {
    fn hold(state: AiState) -> Self {
        Self {
            new_state: state,
            state_changed: false,
            target: TargetChange::Keep,
            roll_rate: None,
            pitch_rate: None,
            speed: None,
            orientation: None,
            fire: false,
        }
    }

    fn transition(&mut self, from: AiState, to: AiState) {
        self.new_state = to;
        self.state_changed = from != to;
    }
}

/// Evaluate the FSM for one ship.
pub fn evaluate(ctx: &AiContext, tuning: &AiTuning, dice: &mut impl Dice) -> AiUpdate {
    match ctx.state {
        AiState::Idle => evaluate_idle(ctx, tuning, dice),
        AiState::Attacking => evaluate_attacking(ctx, tuning, dice),
        AiState::Fleeing => evaluate_fleeing(ctx, tuning, dice),
    }
}

fn evaluate_idle(ctx: &AiContext, tuning: &AiTuning, dice: &mut impl Dice) -> AiUpdate {
    let mut update = AiUpdate::hold(ctx.state);

    update.roll_rate = Some((dice.unit() - 0.5) * 2.0 * tuning.idle_jitter);
    update.pitch_rate = Some((dice.unit() - 0.5) * 2.0 * tuning.idle_jitter);

    if dice.chance(tuning.idle_speed_change_chance) {
        update.speed = Some(dice.unit() * ctx.max_speed * tuning.idle_max_speed_fraction);
    }

    // Never pick a fight with a docked player.
    if ctx.distance < tuning.attack_range
        && !ctx.player_docked
        && dice.chance(tuning.attack_chance)
    {
        update.transition(ctx.state, AiState::Attacking);
        update.target = TargetChange::AcquirePlayer;
    }

    update
}

/// Rules are checked in order and the first transition that matches wins.
/// Motion intents from the pursuit step survive a flee transition.
fn evaluate_attacking(ctx: &AiContext, tuning: &AiTuning, dice: &mut impl Dice) -> AiUpdate {
    let mut update = AiUpdate::hold(ctx.state);

    // 1. Lost the target, or the player is safe inside the station.
    let target = match ctx.target_position {
        Some(pos) if !ctx.player_docked => pos,
        _ => {
            update.transition(ctx.state, AiState::Idle);
            update.target = TargetChange::Clear;
            return update;
        }
    };

    // 2. Pursue.
    let to_target = (target - ctx.position).normalize_or_zero();
    let angle = angle_between(forward_of(ctx.orientation), to_target);

    if angle > tuning.evade_angle {
        // Target is behind: break hard.
        update.roll_rate = Some(tuning.evade_roll_rate * dice.sign());
        update.pitch_rate = Some(tuning.evade_pitch_scale * (dice.unit() - 0.5));
        update.speed = Some(
            (ctx.speed - tuning.attack_acceleration * ctx.dt)
                .max(ctx.max_speed * tuning.evade_speed_fraction),
        );
    } else {
        update.roll_rate = Some((dice.unit() - 0.5) * tuning.steer_roll_scale);

        // Positive pitch about +X drops the nose, so steer against the
        // target's local height.
        let local = ctx.orientation.inverse() * to_target;
        update.pitch_rate = Some(-local.y * tuning.steer_pitch_gain);

        update.speed = Some(if ctx.distance > tuning.standoff_range {
            (ctx.speed + tuning.attack_acceleration * ctx.dt).min(ctx.max_speed)
        } else {
            (ctx.speed - tuning.standoff_deceleration * ctx.dt)
                .max(ctx.max_speed * tuning.standoff_speed_fraction)
        });

        update.fire = ctx.distance < tuning.fire_range
            && angle < tuning.fire_angle
            && dice.chance(tuning.fire_chance);
    }

    // 3. Low on energy: run.
    if ctx.energy < ctx.max_energy * tuning.flee_energy_fraction {
        update.transition(ctx.state, AiState::Fleeing);
        return update;
    }

    // 4. Lose interest.
    if dice.chance(tuning.give_up_chance) || ctx.distance > tuning.pursuit_range {
        update.transition(ctx.state, AiState::Idle);
        update.target = TargetChange::Clear;
    }

    update
}

fn evaluate_fleeing(ctx: &AiContext, tuning: &AiTuning, dice: &mut impl Dice) -> AiUpdate {
    let mut update = AiUpdate::hold(ctx.state);

    let away = (ctx.position - ctx.player_position).normalize_or_zero();
    if away != DVec3::ZERO {
        update.orientation = Some(DQuat::from_rotation_arc(FORWARD, away));
    }
    update.speed = Some((ctx.speed + tuning.flee_acceleration * ctx.dt).min(ctx.max_speed));

    if ctx.distance > tuning.safe_range
        || ctx.energy > ctx.max_energy * tuning.recovered_energy_fraction
        || dice.chance(tuning.calm_down_chance)
    {
        update.transition(ctx.state, AiState::Idle);
    }

    update
}
