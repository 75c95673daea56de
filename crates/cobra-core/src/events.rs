//! Events emitted by the simulation for audio, UI and scene feedback.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Fire-and-forget audio cues for the tone generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// Laser shot. Player shots use a higher pitch.
    Laser { from_player: bool },
    /// A ship blew up.
    Explosion,
    /// Contact with a ship or the station.
    Collision,
    /// Bounty credited.
    Bounty { amount: f64 },
    /// Low tone when the player's energy runs out.
    PlayerDeath,
    MissileArmed,
    MissileLaunched,
    HyperspaceJump,
}

/// Transient on-screen message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    /// CSS color string.
    pub color: String,
    pub duration_ms: u32,
}

/// One-shot visual effects the scene collaborator should play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VisualEvent {
    Explosion { position: DVec3, particles: u32 },
    HyperspaceJump { origin: DVec3, direction: DVec3 },
}

/// Collaborator output gathered during a tick and drained into the snapshot.
#[derive(Debug, Clone, Default)]
pub struct Feedback {
    pub audio: Vec<AudioEvent>,
    pub notifications: Vec<Notification>,
    pub visuals: Vec<VisualEvent>,
}

impl Feedback {
    pub fn cue(&mut self, event: AudioEvent) {
        self.audio.push(event);
    }

    pub fn notify(&mut self, message: impl Into<String>, color: &str, duration_ms: u32) {
        self.notifications.push(Notification {
            message: message.into(),
            color: color.to_string(),
            duration_ms,
        });
    }

    pub fn visual(&mut self, event: VisualEvent) {
        self.visuals.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.audio.is_empty() && self.notifications.is_empty() && self.visuals.is_empty()
    }
}
