//! Batched, fire-and-forget requests to the diffusion engine.

use bastion_core::events::{DiffusionMessage, EmitterConfig, EntitySummary, GridDims};

use crate::diffusion::DiffusionLink;
use crate::world::World;

/// Flush this tick's requests: disperse on cadence, then withdrawn
/// sources, then refreshed ones.
pub fn run(world: &mut World, link: &mut DiffusionLink, disperse_every: u64) {
    if disperse_every > 0 && world.time % disperse_every == 0 {
        link.send(DiffusionMessage::DispersePheromones);
    }
    if !world.reverse_flood_fill_sources.is_empty() {
        let sources = std::mem::take(&mut world.reverse_flood_fill_sources);
        link.send(DiffusionMessage::ReverseFloodFill { sources });
    }
    if !world.flood_fill_sources.is_empty() {
        let sources = std::mem::take(&mut world.flood_fill_sources);
        link.send(DiffusionMessage::FloodFill { sources });
    }
}

/// Initial description of the world for the diffusion engine.
pub fn init_message(world: &World) -> DiffusionMessage {
    let entities = world
        .iter()
        .map(|e| EntitySummary {
            id: e.id,
            kind: e.kind,
            position: e.position,
            width: e.width,
            height: e.height,
        })
        .collect();
    let emitters = world
        .iter()
        .filter_map(|e| {
            e.emitter.map(|emitter| EmitterConfig {
                id: e.id,
                pheromone: emitter.pheromone,
                quantity: emitter.quantity,
                position: e.center(),
            })
        })
        .collect();
    DiffusionMessage::Init {
        grid: GridDims {
            width: world.grid_width(),
            height: world.grid_height(),
        },
        entities,
        emitters,
    }
}
