//! Passive shield and energy regeneration for the player.

use cobra_core::constants::{ENERGY_REGEN_RATE, MAX_ENERGY, SHIELD_REGEN_RATE};

use crate::pilot::Pilot;

pub fn run(pilot: &mut Pilot, dt: f64) {
    // Nothing recharges until the respawn.
    if pilot.is_dead() {
        return;
    }
    pilot.shields.regenerate(SHIELD_REGEN_RATE * dt);
    if pilot.energy < MAX_ENERGY {
        pilot.energy = (pilot.energy + ENERGY_REGEN_RATE * dt).min(MAX_ENERGY);
    }
}
