//! Fundamental geometric and simulation types.
//!
//! Ships live in a right-handed frame: local +Z is the nose, +X the pitch
//! axis and +Y the roof. All math is f64 through glam's `D*` types.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// Local nose axis. Ships translate along `orientation * FORWARD`.
pub const FORWARD: DVec3 = DVec3::Z;

/// Local pitch axis. With +Y as the roof this points out of the port side.
pub const PITCH_AXIS: DVec3 = DVec3::X;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of simulated frames so far.
    pub tick: u64,
    /// Elapsed simulation time in seconds (sum of clamped frame deltas).
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// World-space nose direction for an orientation.
pub fn forward_of(orientation: DQuat) -> DVec3 {
    orientation * FORWARD
}

/// World-space pitch axis for an orientation.
pub fn pitch_axis_of(orientation: DQuat) -> DVec3 {
    orientation * PITCH_AXIS
}

/// Angle in radians between two directions. Zero-length input yields π/2,
/// matching the behaviour of a clamped dot product of zero.
pub fn angle_between(a: DVec3, b: DVec3) -> f64 {
    let denom = (a.length_squared() * b.length_squared()).sqrt();
    if denom == 0.0 {
        return std::f64::consts::FRAC_PI_2;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos()
}

/// Unit vector from `u` samples in [0, 1), the way spawn directions are rolled.
/// Falls back to `FORWARD` for the (measure-zero) all-center case.
pub fn direction_from_samples(ux: f64, uy: f64, uz: f64) -> DVec3 {
    let dir = DVec3::new(ux - 0.5, uy - 0.5, uz - 0.5).normalize_or_zero();
    if dir == DVec3::ZERO {
        FORWARD
    } else {
        dir
    }
}
