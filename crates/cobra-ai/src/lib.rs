//! Ship AI for Cobra.
//!
//! Implements the idle / attacking / fleeing state machine that drives every
//! non-player ship, plus its tuning profile and a dice abstraction.

pub mod dice;
pub mod fsm;
pub mod tuning;

pub use cobra_core as core;
