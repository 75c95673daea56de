//! Game loop thread: runs the simulation engine at the display rate and
//! emits snapshots.
//!
//! The engine is moved into this thread so it has a single owner. Commands
//! arrive via an `mpsc` channel. Snapshots go to the caller's sink and are
//! stored in shared state for synchronous polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use cobra_core::state::GameStateSnapshot;
use cobra_sim::engine::SimulationEngine;

use crate::state::GameLoopCommand;

/// Target frames per second of the host loop.
pub const FRAME_RATE: u32 = 60;

/// Nominal duration of one frame.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the input side and the thread handle.
pub fn spawn_game_loop<S>(
    engine: SimulationEngine,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    sink: S,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)>
where
    S: FnMut(&GameStateSnapshot) -> io::Result<()> + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("cobra-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, cmd_rx, &latest_snapshot, sink);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown, channel disconnect, or a sink error.
fn run_game_loop<S>(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    mut sink: S,
) where
    S: FnMut(&GameStateSnapshot) -> io::Result<()>,
{
    let mut last_frame = Instant::now();
    let mut next_frame_time = last_frame;

    loop {
        // 1. Drain all pending commands
        if !drain_commands(&mut engine, &cmd_rx) {
            log::info!("game loop stopping at frame {}", engine.time().tick);
            return;
        }

        // 2. Advance by the wall-clock time since the last frame. The engine
        //    clamps long stalls and handles pause itself.
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;
        let snapshot = engine.tick(dt);

        // 3. Emit snapshot
        if let Err(e) = sink(&snapshot) {
            log::error!("snapshot sink failed: {e}");
            return;
        }

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until the next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind: reset rather than spin to catch up.
            next_frame_time = now;
        }
    }
}

/// Queue everything waiting on the channel. Returns `false` once the loop
/// should stop.
fn drain_commands(engine: &mut SimulationEngine, cmd_rx: &mpsc::Receiver<GameLoopCommand>) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                log::debug!("command: {cmd:?}");
                engine.queue_command(cmd);
            }
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}
