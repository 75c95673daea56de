//! Scanner projection of the station into the player's frame.

use glam::DVec3;

use cobra_core::components::Pose;
use cobra_core::state::ScannerView;

/// Smallest depth used for the perspective divide.
const MIN_DEPTH: f64 = 0.001;

/// Project `target` onto the scanner of a ship at `viewer`.
///
/// The offset is rotated into the ship's frame and divided by its depth,
/// then clamped to the scanner face.
pub fn project(viewer: &Pose, target: DVec3) -> ScannerView {
    let local = viewer.orientation.inverse() * (target - viewer.position);
    let depth = local.z.abs().max(MIN_DEPTH);

    ScannerView {
        x: (local.x / depth).clamp(-1.0, 1.0),
        y: (local.y / depth).clamp(-1.0, 1.0),
        in_front: local.z > 0.0,
    }
}
