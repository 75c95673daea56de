//! Core types and definitions for the Cobra flight simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, ship blueprints and constants.
//! It has no dependency on any runtime or host framework.

pub mod blueprints;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
