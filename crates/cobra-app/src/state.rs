//! Application state shared between the input reader and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use thiserror::Error;

use cobra_core::commands::PlayerCommand;
use cobra_core::error::ConfigError;
use cobra_core::state::GameStateSnapshot;

/// Commands sent from the input side to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Everything that can go wrong outside the simulation itself.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("simulation already running")]
    AlreadyRunning,

    #[error("simulation not started")]
    NotStarted,

    #[error("game loop has stopped")]
    LoopStopped,

    #[error("shared state lock poisoned")]
    Poisoned,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("malformed command: {0}")]
    Command(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Shared application state.
///
/// - `mpsc::Sender` sits behind a `Mutex` so the state can be shared.
/// - `Mutex<Option<...>>` holds what does not exist before `start_simulation`.
/// - The latest snapshot is an `Arc<Mutex<...>>` shared with the loop thread.
pub struct AppState {
    /// Channel sender to forward commands to the game loop thread.
    /// `None` before `start_simulation` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot for synchronous polling.
    /// Updated by the game loop thread after each frame.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    /// Loop thread handle, taken on shutdown.
    pub loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.command_tx
            .lock()
            .map(|tx| tx.is_some())
            .unwrap_or(false)
    }
}
