//! Player-only state: energy banks, shields, wallet and navigation.

use serde::{Deserialize, Serialize};

use cobra_core::constants::*;
use cobra_core::enums::{Condition, ViewDirection};

/// Fore and aft shield pools, each within `0..=MAX_SHIELDS`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shields {
    pub fore: f64,
    pub aft: f64,
}

impl Shields {
    pub fn full() -> Self {
        Self {
            fore: MAX_SHIELDS,
            aft: MAX_SHIELDS,
        }
    }

    pub fn total(&self) -> f64 {
        self.fore + self.aft
    }

    /// Soak up as much of `amount` as the pools allow and return the rest.
    ///
    /// The absorbed share is split evenly; when the fore pool cannot take its
    /// half, the shortfall is pushed onto the aft pool.
    pub fn absorb(&mut self, amount: f64) -> f64 {
        let absorbed = self.total().min(amount).max(0.0);
        let half = absorbed / 2.0;
        let fore_damage = self.fore.min(half);
        let aft_damage = self.aft.min(half + (half - self.fore).max(0.0));

        self.fore = (self.fore - fore_damage).max(0.0);
        self.aft = (self.aft - aft_damage).max(0.0);
        amount - absorbed
    }

    pub fn regenerate(&mut self, amount: f64) {
        if self.fore < MAX_SHIELDS {
            self.fore = (self.fore + amount).min(MAX_SHIELDS);
        }
        if self.aft < MAX_SHIELDS {
            self.aft = (self.aft + amount).min(MAX_SHIELDS);
        }
    }
}

/// The commander: everything about the player that is not the hull's pose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pilot {
    /// Within `0..=MAX_ENERGY`.
    pub energy: f64,
    pub shields: Shields,
    pub cash: f64,
    pub fuel: f64,
    pub missiles: u32,
    pub missile_armed: bool,
    /// Laser power per view, indexed by `ViewDirection::index`.
    pub laser_mounts: [f64; 4],
    pub view: ViewDirection,
    pub condition: Condition,
    pub docked: bool,
    /// Index into `GALAXY`.
    pub current_system: usize,
    pub hyperspace_target: usize,
}

impl Default for Pilot {
    fn default() -> Self {
        Self {
            energy: MAX_ENERGY,
            shields: Shields::full(),
            cash: STARTING_CASH,
            fuel: MAX_FUEL,
            missiles: STARTING_MISSILES,
            missile_armed: false,
            laser_mounts: STARTING_LASER_MOUNTS,
            view: ViewDirection::Front,
            condition: Condition::Docked,
            docked: true,
            current_system: 0,
            hyperspace_target: 1,
        }
    }
}

impl Pilot {
    /// Power of the laser mounted on the current view.
    pub fn laser_power(&self) -> f64 {
        self.laser_mounts[self.view.index()]
    }

    pub fn is_dead(&self) -> bool {
        self.condition == Condition::Dead
    }

    pub fn drain_energy(&mut self, amount: f64) {
        self.energy = (self.energy - amount).max(0.0);
    }

    pub fn current_system_name(&self) -> &'static str {
        GALAXY.get(self.current_system).copied().unwrap_or_default()
    }

    pub fn hyperspace_target_name(&self) -> &'static str {
        GALAXY.get(self.hyperspace_target).copied().unwrap_or_default()
    }
}
