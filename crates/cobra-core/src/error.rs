//! Configuration errors. The tick path itself never fails.

use thiserror::Error;

use crate::enums::ShipClass;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ship catalog has no blueprint for {0:?}")]
    MissingBlueprint(ShipClass),

    #[error("ship catalog lists {0:?} more than once")]
    DuplicateBlueprint(ShipClass),

    #[error("ship catalog has no spawnable ships")]
    NoSpawnableShips,

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}
