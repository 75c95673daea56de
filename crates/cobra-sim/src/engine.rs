//! Simulation engine: the frame orchestrator.
//!
//! `SimulationEngine` owns the world, processes player commands, runs all
//! systems in order and produces `GameStateSnapshot`s. Completely headless,
//! which keeps it deterministic and testable.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use cobra_ai::tuning::AiTuning;
use cobra_core::blueprints::ShipCatalog;
use cobra_core::commands::{ControlState, PlayerCommand};
use cobra_core::constants::{MAX_FRAME_DT, SHIP_AI_SPAWN_COUNT, SHIP_RESPAWN_DISTANCE};
use cobra_core::enums::GamePhase;
use cobra_core::error::ConfigError;
use cobra_core::events::Feedback;
use cobra_core::state::GameStateSnapshot;
use cobra_core::types::SimTime;

use crate::pilot::Pilot;
use crate::scheduler::Scheduler;
use crate::systems;
use crate::systems::ai::AiPass;
use crate::world::GameWorld;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Multiplier on the host's frame delta (1.0 = normal).
    pub time_scale: f64,
    /// Roaming ships spawned at start-up and after each jump.
    pub spawn_count: usize,
    /// Reference radius for spawning and the tether safeguard.
    pub respawn_distance: f64,
    pub catalog: ShipCatalog,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            spawn_count: SHIP_AI_SPAWN_COUNT,
            respawn_distance: SHIP_RESPAWN_DISTANCE,
            catalog: ShipCatalog::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_scale.is_nan() || self.time_scale <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "time_scale",
                value: self.time_scale,
            });
        }
        if self.respawn_distance.is_nan() || self.respawn_distance <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "respawn_distance",
                value: self.respawn_distance,
            });
        }
        self.catalog.validate()
    }
}

/// The simulation engine. Owns the world and all sim state.
pub struct SimulationEngine {
    world: GameWorld,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    catalog: ShipCatalog,
    spawn_count: usize,
    respawn_distance: f64,
    tuning: AiTuning,
    controls: ControlState,
    command_queue: VecDeque<PlayerCommand>,
    scheduler: Scheduler,
    feedback: Feedback,
    despawn_buffer: Vec<hecs::Entity>,
}

impl SimulationEngine {
    /// Validate the config and build the start-of-game world: player docked,
    /// station nearby, a first batch of roaming ships.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let world = world_setup::build_world(&config.catalog, &mut rng, config.spawn_count)?;
        log::info!(
            "simulation ready: seed {}, {} ships in {}",
            config.seed,
            world.npc_ships().len(),
            world.pilot.current_system_name()
        );

        Ok(Self {
            world,
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale,
            rng,
            catalog: config.catalog,
            spawn_count: config.spawn_count,
            respawn_distance: config.respawn_distance,
            tuning: AiTuning::default(),
            controls: ControlState::default(),
            command_queue: VecDeque::new(),
            scheduler: Scheduler::new(),
            feedback: Feedback::default(),
            despawn_buffer: Vec::new(),
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds of host time and return the
    /// resulting snapshot.
    ///
    /// The delta is scaled by the time scale and clamped to `MAX_FRAME_DT`.
    /// A non-positive delta still processes commands but moves nothing.
    pub fn tick(&mut self, dt: f64) -> GameStateSnapshot {
        self.process_commands();

        let dt = dt * self.time_scale;
        if self.phase == GamePhase::Active && dt > 0.0 {
            let dt = dt.min(MAX_FRAME_DT);
            self.time.advance(dt);
            self.scheduler.advance_to(self.time.elapsed_secs);
            systems::effects::run(&mut self.world, &mut self.scheduler, &mut self.feedback);

            if !self.world.pilot.docked {
                self.run_systems(dt);
            }
        }

        let feedback = std::mem::take(&mut self.feedback);
        systems::snapshot::build_snapshot(&self.world, &self.time, self.phase, feedback)
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Get a read-only reference to the world.
    pub fn world(&self) -> &GameWorld {
        &self.world
    }

    pub fn pilot(&self) -> &Pilot {
        &self.world.pilot
    }

    pub fn controls(&self) -> ControlState {
        self.controls
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Mutable world access for arranging test scenarios.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut GameWorld {
        &mut self.world
    }

    /// Replace the AI tuning (for tests that need a quiet or aggressive AI).
    #[cfg(test)]
    pub fn set_tuning(&mut self, tuning: AiTuning) {
        self.tuning = tuning;
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Commands whose preconditions fail are
    /// dropped silently.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SetControls { controls } => {
                self.controls = controls;
            }
            PlayerCommand::SetView { view } => {
                self.world.pilot.view = view;
            }
            PlayerCommand::Launch => {
                systems::navigation::launch(&mut self.world);
            }
            PlayerCommand::Dock => {
                systems::navigation::dock(&mut self.world);
            }
            PlayerCommand::SelectHyperspaceTarget { system } => {
                systems::navigation::select_hyperspace_target(&mut self.world, system);
            }
            PlayerCommand::Hyperspace => {
                systems::navigation::hyperspace(
                    &mut self.world,
                    &self.catalog,
                    &mut self.rng,
                    self.spawn_count,
                    &mut self.feedback,
                );
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
        }
    }

    /// Run the flight pipeline in order.
    fn run_systems(&mut self, dt: f64) {
        let controls = self.controls;
        let player = self.world.player;

        // 1. Flight controls
        systems::controls::run(&mut self.world, &controls, dt);
        // 2. Player kinematics
        systems::kinematics::advance_entity(&mut self.world.ecs, player, dt);
        // 3. Beam lifetimes, before anything fires this frame
        systems::beams::run(&mut self.world.ecs, dt, &mut self.despawn_buffer);
        // 4. AI + NPC kinematics
        let pass = AiPass {
            dt,
            tuning: &self.tuning,
            respawn_distance: self.respawn_distance,
        };
        systems::ai::run(
            &mut self.world,
            &pass,
            &mut self.rng,
            &mut self.scheduler,
            &mut self.feedback,
        );
        // 5. Station spin
        systems::navigation::spin_station(&mut self.world.ecs, dt);
        // 6. Collisions
        let report = systems::collision::run(&mut self.world, &mut self.scheduler, &mut self.feedback);
        if let Some(amount) = report.station_impact {
            log::debug!("station impact for {amount:.1}");
        }
        // 7. Held combat actions
        if controls.fire_laser {
            systems::weapons::fire(&mut self.world, player, &mut self.scheduler, &mut self.feedback);
        }
        systems::missiles::run(&mut self.world.pilot, &controls, &mut self.feedback);
        // 8. Shield and energy regeneration
        systems::regen::run(&mut self.world.pilot, dt);
    }
}
