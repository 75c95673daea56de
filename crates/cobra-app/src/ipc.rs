//! Command handlers and the JSON-lines wire format.
//!
//! The host reads one `PlayerCommand` per line on its input and writes one
//! snapshot per line on its output. The handlers bridge those requests to
//! the game loop thread via channels.

use std::io::{self, Write};

use cobra_core::commands::PlayerCommand;
use cobra_core::state::GameStateSnapshot;
use cobra_sim::engine::{SimConfig, SimulationEngine};

use crate::game_loop;
use crate::state::{AppError, AppState, GameLoopCommand};

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation<S>(state: &AppState, config: SimConfig, sink: S) -> Result<(), AppError>
where
    S: FnMut(&GameStateSnapshot) -> io::Result<()> + Send + 'static,
{
    let mut tx_lock = state.command_tx.lock().map_err(|_| AppError::Poisoned)?;
    if tx_lock.is_some() {
        return Err(AppError::AlreadyRunning);
    }

    let engine = SimulationEngine::new(config)?;
    let (cmd_tx, handle) =
        game_loop::spawn_game_loop(engine, state.latest_snapshot.clone(), sink)?;

    *tx_lock = Some(cmd_tx);
    *state.loop_handle.lock().map_err(|_| AppError::Poisoned)? = Some(handle);
    Ok(())
}

/// Send a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), AppError> {
    let tx_lock = state.command_tx.lock().map_err(|_| AppError::Poisoned)?;

    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::PlayerCommand(command))
            .map_err(|_| AppError::LoopStopped),
        None => Err(AppError::NotStarted),
    }
}

/// Get the latest snapshot synchronously (for polling / initial state).
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>, AppError> {
    let lock = state.latest_snapshot.lock().map_err(|_| AppError::Poisoned)?;
    Ok(lock.clone())
}

/// Stop the loop and wait for its thread to finish.
pub fn stop_simulation(state: &AppState) -> Result<(), AppError> {
    let tx = state
        .command_tx
        .lock()
        .map_err(|_| AppError::Poisoned)?
        .take()
        .ok_or(AppError::NotStarted)?;
    // The loop may already be gone; joining below is all that matters then.
    let _ = tx.send(GameLoopCommand::Shutdown);

    let handle = state.loop_handle.lock().map_err(|_| AppError::Poisoned)?.take();
    if let Some(handle) = handle {
        if handle.join().is_err() {
            log::error!("game loop thread panicked");
        }
    }
    Ok(())
}

/// Parse one input line. Blank lines carry no command.
pub fn parse_command(line: &str) -> Result<Option<PlayerCommand>, AppError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(line)?))
}

/// Write one snapshot as a single JSON line and flush it.
pub fn write_snapshot(out: &mut impl Write, snapshot: &GameStateSnapshot) -> io::Result<()> {
    serde_json::to_writer(&mut *out, snapshot)?;
    out.write_all(b"\n")?;
    out.flush()
}
