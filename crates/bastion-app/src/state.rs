//! State shared between the caller and the tick loop thread.

use std::sync::{Arc, Mutex};

use bastion_core::commands::PlayerCommand;
use bastion_core::events::PheromoneUpdate;
use bastion_core::state::WorldSnapshot;

/// Messages delivered to the tick loop between ticks.
#[derive(Debug)]
pub enum LoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// A diffusion result to apply to the world.
    Pheromones(PheromoneUpdate),
    /// Stop after the current tick.
    Shutdown,
}

/// Latest snapshot, published by the loop after every tick.
pub type SharedSnapshot = Arc<Mutex<Option<WorldSnapshot>>>;

pub fn shared_snapshot() -> SharedSnapshot {
    Arc::new(Mutex::new(None))
}
