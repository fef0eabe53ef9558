//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the world, processes player commands, runs all
//! systems in a fixed order, and produces `WorldSnapshot`s. Completely
//! headless, so it can be driven by a real-time scheduler or by tests.

use std::collections::VecDeque;
use std::sync::mpsc::Sender;

use glam::DVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use bastion_core::commands::PlayerCommand;
use bastion_core::components::{KeysDown, TargetRequest};
use bastion_core::config::SimConfig;
use bastion_core::constants::AIM_HINT;
use bastion_core::events::{DiffusionMessage, PheromoneUpdate};
use bastion_core::state::WorldSnapshot;

use crate::decision::{DecisionHook, WanderDecision};
use crate::diffusion::DiffusionLink;
use crate::factory;
use crate::systems;
use crate::world::World;

/// The simulation engine. Owns the world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: SimConfig,
    rng: ChaCha8Rng,
    decision: Box<dyn DecisionHook>,
    diffusion: DiffusionLink,
    command_queue: VecDeque<PlayerCommand>,
}

impl SimulationEngine {
    /// Create an engine over an empty world.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(&config),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            decision: Box::new(WanderDecision::new(config.seed)),
            diffusion: DiffusionLink::default(),
            command_queue: VecDeque::new(),
            config,
        }
    }

    /// Replace the decision hook used for idle agents.
    pub fn with_decision_hook(mut self, hook: impl DecisionHook + 'static) -> Self {
        self.decision = Box::new(hook);
        self
    }

    /// Route diffusion requests to `sender`.
    pub fn attach_diffusion(&mut self, sender: Sender<DiffusionMessage>) {
        self.diffusion = DiffusionLink::new(sender);
    }

    /// Populate the world with the default level.
    pub fn setup_level(&mut self) {
        factory::setup_level(&mut self.world);
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply a diffusion result. Call between ticks.
    pub fn apply_pheromone_update(&mut self, update: &PheromoneUpdate) {
        self.world.apply_pheromone_update(update);
    }

    /// Advance the simulation by `elapsed_ms` of real time and return the
    /// resulting snapshot.
    pub fn tick(&mut self, elapsed_ms: f64) -> WorldSnapshot {
        self.process_commands();

        if !self.world.game_over {
            self.world.time += 1;
            self.world.time_since_last_tick = elapsed_ms.max(0.0);
            if self.world.time == 1 {
                let init = systems::pheromones::init_message(&self.world);
                self.diffusion.send(init);
                self.world.ticker = Some(systems::tickers::ticker(AIM_HINT));
            }
            self.run_systems();
            self.world.total_game_time += self.world.time_since_last_tick;
        }

        systems::snapshot::build_snapshot(&self.world)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access, for scenario setup between ticks.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        let world = &mut self.world;
        match command {
            PlayerCommand::SetCrosshair { x, y } => {
                world.crosshair = Some(DVec2::new(x, y));
            }
            PlayerCommand::ClearCrosshair => {
                world.crosshair = None;
            }
            PlayerCommand::EnqueueTarget { x, y, projectile } => {
                let request = TargetRequest {
                    position: DVec2::new(x, y),
                    projectile,
                };
                let base = world.bases.first().copied();
                let turret = base
                    .and_then(|id| world.get_mut(id))
                    .and_then(|base| base.turret.as_mut());
                match turret {
                    Some(turret) => turret.target_queue.push_back(request),
                    None => warn!(?request, "no base to take the target"),
                }
            }
            PlayerCommand::SetPlaceType { projectile } => {
                world.place_type = projectile;
            }
            PlayerCommand::SetKeys {
                up,
                down,
                left,
                right,
            } => {
                world.keys_down = KeysDown {
                    up,
                    down,
                    left,
                    right,
                };
            }
            PlayerCommand::Focus { id } => match id {
                Some(id) if !world.contains(id) => warn!(%id, "cannot focus missing entity"),
                _ => world.focused = id,
            },
            PlayerCommand::Control { id } => match id {
                Some(id) if !world.contains(id) => warn!(%id, "cannot control missing entity"),
                _ => {
                    debug!(?id, "control changed");
                    world.controlled = id;
                }
            },
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let world = &mut self.world;
        // 1. Held input on the controlled entity
        systems::controlled::run(world);
        // 2. Action state machines (decision hook on hand-off)
        systems::actors::run(world, self.decision.as_mut());
        // 3. Idle agents
        systems::agents::run(world, self.decision.as_mut());
        // 4. Tile neighbour masks
        systems::tiles::run(world);
        // 5. Camera
        systems::camera::run(world);
        // 6. Tickers
        systems::tickers::run(world);
        // 7. Emitter refresh
        systems::emitters::run(world);
        // 8. Tower targeting and firing
        systems::towers::run(world);
        // 9. Rotors
        systems::farms::run(world);
        // 10. Base idle pass
        systems::bases::run(world);
        // 11. Ballistics
        systems::ballistics::run(world, &mut self.rng);
        // 12. Explosive fuses
        systems::explosives::run(world);
        // 13. Diffusion dispatch
        systems::pheromones::run(
            world,
            &mut self.diffusion,
            self.config.dispersing_pheromone_update_rate,
        );
    }
}
