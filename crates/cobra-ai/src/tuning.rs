//! Behaviour parameters for the ship AI.
//!
//! Consolidates the tuning constants the state machine reads so a caller can
//! run the FSM with a modified set (tests, difficulty tweaks).

use cobra_core::constants::*;

/// Behavioural profile shared by all non-player ships.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiTuning {
    /// Half-width of the idle roll/pitch jitter (rad/s).
    pub idle_jitter: f64,
    pub idle_speed_change_chance: f64,
    pub idle_max_speed_fraction: f64,
    pub attack_range: f64,
    pub attack_chance: f64,

    pub evade_angle: f64,
    pub evade_roll_rate: f64,
    pub evade_pitch_scale: f64,
    pub evade_speed_fraction: f64,
    pub attack_acceleration: f64,
    pub standoff_range: f64,
    pub standoff_deceleration: f64,
    pub standoff_speed_fraction: f64,
    pub steer_roll_scale: f64,
    pub steer_pitch_gain: f64,
    pub fire_range: f64,
    pub fire_angle: f64,
    pub fire_chance: f64,
    pub give_up_chance: f64,
    pub pursuit_range: f64,
    pub flee_energy_fraction: f64,

    pub flee_acceleration: f64,
    pub safe_range: f64,
    pub recovered_energy_fraction: f64,
    pub calm_down_chance: f64,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            idle_jitter: AI_IDLE_JITTER,
            idle_speed_change_chance: AI_IDLE_SPEED_CHANGE_CHANCE,
            idle_max_speed_fraction: AI_IDLE_MAX_SPEED_FRACTION,
            attack_range: AI_ATTACK_RANGE,
            attack_chance: AI_ATTACK_CHANCE,
            evade_angle: AI_EVADE_ANGLE,
            evade_roll_rate: AI_EVADE_ROLL_RATE,
            evade_pitch_scale: AI_EVADE_PITCH_SCALE,
            evade_speed_fraction: AI_EVADE_SPEED_FRACTION,
            attack_acceleration: AI_ATTACK_ACCELERATION,
            standoff_range: AI_STANDOFF_RANGE,
            standoff_deceleration: AI_STANDOFF_DECELERATION,
            standoff_speed_fraction: AI_STANDOFF_SPEED_FRACTION,
            steer_roll_scale: AI_STEER_ROLL_SCALE,
            steer_pitch_gain: AI_STEER_PITCH_GAIN,
            fire_range: AI_FIRE_RANGE,
            fire_angle: AI_FIRE_ANGLE,
            fire_chance: AI_FIRE_CHANCE,
            give_up_chance: AI_GIVE_UP_CHANCE,
            pursuit_range: AI_PURSUIT_RANGE,
            flee_energy_fraction: AI_FLEE_ENERGY_FRACTION,
            flee_acceleration: AI_FLEE_ACCELERATION,
            safe_range: AI_SAFE_RANGE,
            recovered_energy_fraction: AI_RECOVERED_ENERGY_FRACTION,
            calm_down_chance: AI_CALM_DOWN_CHANCE,
        }
    }
}
