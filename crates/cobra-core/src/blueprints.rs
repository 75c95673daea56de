//! Ship blueprints: per-class performance and combat stats.
//!
//! The built-in catalog can be replaced from JSON so hulls can be retuned
//! without a rebuild.

use serde::{Deserialize, Serialize};

use crate::components::Hull;
use crate::enums::ShipClass;
use crate::error::ConfigError;

/// Stats for one hull type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipBlueprint {
    pub class: ShipClass,
    pub max_speed: f64,
    pub energy: f64,
    pub laser_power: f64,
    #[serde(default)]
    pub missiles: u32,
    #[serde(default)]
    pub bounty: f64,
    #[serde(default = "default_explosion_particles")]
    pub explosion_particles: u32,
    /// Whether random spawns may pick this hull.
    #[serde(default = "default_spawnable")]
    pub spawnable: bool,
}

fn default_explosion_particles() -> u32 {
    30
}

fn default_spawnable() -> bool {
    true
}

impl ShipBlueprint {
    /// Combat stats for a freshly built ship of this class.
    pub fn hull(&self) -> Hull {
        Hull {
            energy: self.energy,
            max_energy: self.energy,
            laser_power: self.laser_power,
            missiles: self.missiles,
            bounty: self.bounty,
            explosion_particles: self.explosion_particles,
        }
    }
}

/// The set of hulls known to the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipCatalog {
    pub blueprints: Vec<ShipBlueprint>,
}

impl Default for ShipCatalog {
    fn default() -> Self {
        use ShipClass::*;
        let bp = |class, max_speed, energy, laser_power, missiles, bounty, particles, spawnable| {
            ShipBlueprint {
                class,
                max_speed,
                energy,
                laser_power,
                missiles,
                bounty,
                explosion_particles: particles,
                spawnable,
            }
        };
        Self {
            blueprints: vec![
                bp(CobraMk3, 40.0, 150.0, 2.0, 3, 0.0, 30, false),
                bp(Coriolis, 0.0, 240.0, 0.0, 6, 0.0, 100, false),
                bp(Sidewinder, 37.0, 70.0, 2.0, 0, 50.0, 30, true),
                bp(Mamba, 30.0, 90.0, 2.0, 2, 150.0, 30, true),
                bp(Krait, 30.0, 80.0, 2.0, 0, 100.0, 30, true),
                bp(Adder, 24.0, 85.0, 2.0, 0, 40.0, 30, true),
                bp(Gecko, 30.0, 70.0, 2.0, 0, 55.0, 30, true),
                bp(Viper, 32.0, 120.0, 2.0, 1, 0.0, 30, true),
                bp(Asp, 40.0, 150.0, 5.0, 1, 200.0, 30, true),
                bp(Python, 20.0, 250.0, 3.0, 3, 0.0, 60, true),
            ],
        }
    }
}

impl ShipCatalog {
    /// Parse and validate a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let catalog: ShipCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn get(&self, class: ShipClass) -> Option<&ShipBlueprint> {
        self.blueprints.iter().find(|b| b.class == class)
    }

    /// Hulls eligible for random spawning, in catalog order.
    pub fn spawnable(&self) -> Vec<ShipClass> {
        self.blueprints
            .iter()
            .filter(|b| b.spawnable)
            .map(|b| b.class)
            .collect()
    }

    /// The player ship and station must exist, classes must be unique,
    /// at least one hull must be spawnable, and stats must be sane.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for required in [ShipClass::CobraMk3, ShipClass::Coriolis] {
            if self.get(required).is_none() {
                return Err(ConfigError::MissingBlueprint(required));
            }
        }

        for (i, bp) in self.blueprints.iter().enumerate() {
            if self.blueprints[..i].iter().any(|b| b.class == bp.class) {
                return Err(ConfigError::DuplicateBlueprint(bp.class));
            }
            if bp.energy <= 0.0 {
                return Err(ConfigError::NonPositive {
                    field: "energy",
                    value: bp.energy,
                });
            }
            if bp.max_speed < 0.0 {
                return Err(ConfigError::NonPositive {
                    field: "max_speed",
                    value: bp.max_speed,
                });
            }
        }

        if self.spawnable().is_empty() {
            return Err(ConfigError::NoSpawnableShips);
        }
        Ok(())
    }
}
