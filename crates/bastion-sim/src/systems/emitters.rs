//! Staggered pheromone emitter refresh.

use tracing::warn;

use bastion_core::events::PheromoneSource;
use bastion_core::types::{cell_of, EntityId};

use crate::world::World;

/// Refreshes are offset by entity index so emitters sharing a rate do not
/// all fire on the same tick.
pub fn refresh_due(time: u64, index: u32, refresh_rate: u64) -> bool {
    refresh_rate > 0 && (time + index as u64) % refresh_rate == 0
}

pub fn run(world: &mut World) {
    let ids: Vec<EntityId> = world.emitters.iter().copied().collect();
    for id in ids {
        let Some(entity) = world.get(id) else {
            warn!(%id, "stale emitter id; skipping");
            continue;
        };
        let Some(emitter) = entity.emitter else {
            continue;
        };
        let Some(rate) = emitter.refresh_rate else {
            continue;
        };
        if emitter.quantity > 0.0 && refresh_due(world.time, id.index, rate) {
            let source = PheromoneSource {
                id,
                pheromone: emitter.pheromone,
                position: cell_of(entity.center()),
                quantity: emitter.quantity,
            };
            world.flood_fill_sources.push(source);
        }
    }
}
