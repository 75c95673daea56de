use std::io::{self, BufRead};

use cobra_app::ipc;
use cobra_app::state::{AppError, AppState};
use cobra_sim::engine::SimConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

/// Usage: `cobra [config.json]`. Commands on stdin, snapshots on stdout.
fn run() -> Result<(), AppError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading config from {path}");
            SimConfig::from_json(&std::fs::read_to_string(path)?)?
        }
        None => SimConfig::default(),
    };

    let state = AppState::new();
    ipc::start_simulation(&state, config, |snapshot| {
        ipc::write_snapshot(&mut io::stdout().lock(), snapshot)
    })?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        match ipc::parse_command(&line) {
            Ok(Some(command)) => {
                if let Err(e) = ipc::send_command(&state, command) {
                    log::warn!("{e}");
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => log::warn!("skipping input line: {e}"),
        }
    }

    log::info!("input closed; shutting down");
    ipc::stop_simulation(&state)
}
