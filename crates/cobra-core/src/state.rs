//! Game state snapshot: the complete visible state handed to collaborators each tick.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{AudioEvent, Notification, VisualEvent};
use crate::types::SimTime;

/// Complete game state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub pilot: PilotView,
    pub player: Option<ShipView>,
    pub station: Option<ShipView>,
    /// Roaming ships, including ones in their destruction window.
    pub ships: Vec<ShipView>,
    pub beams: Vec<BeamView>,
    pub hit_markers: Vec<DVec3>,
    pub scanner: ScannerView,
    pub audio_events: Vec<AudioEvent>,
    pub notifications: Vec<Notification>,
    pub visual_events: Vec<VisualEvent>,
}

/// Player status panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PilotView {
    pub condition: Condition,
    pub docked: bool,
    pub energy: f64,
    pub shield_fore: f64,
    pub shield_aft: f64,
    pub cash: f64,
    pub fuel: f64,
    pub missiles: u32,
    pub missile_armed: bool,
    pub view: ViewDirection,
    pub laser_power: f64,
    pub current_system: String,
    pub hyperspace_target: String,
}

/// A ship as the scene collaborator needs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipView {
    /// Stable handle for matching render objects across snapshots.
    pub id: u64,
    pub class: ShipClass,
    pub position: DVec3,
    pub orientation: DQuat,
    pub speed: f64,
    pub alive: bool,
    /// Present for non-player ships only.
    pub ai_state: Option<AiState>,
    pub energy: Option<f64>,
}

/// A beam still visible this frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamView {
    pub start: DVec3,
    pub end: DVec3,
    pub from_player: bool,
}

/// Station blip on the scanner, in normalized [-1, 1] scanner coordinates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScannerView {
    pub x: f64,
    pub y: f64,
    /// Solid blip when ahead, hollow when behind.
    pub in_front: bool,
}
