//! Recompute neighbour masks of tiles touched since the last tick.

use tracing::trace;

use crate::world::World;

pub fn run(world: &mut World) {
    let mut stale = std::mem::take(&mut world.stale_tiles);
    stale.sort();
    stale.dedup();

    for id in stale {
        let Some(mask) = world.neighbor_mask(id) else {
            trace!(%id, "stale tile already removed");
            continue;
        };
        if let Some(entity) = world.get_mut(id) {
            if entity.kind.is_tiled() {
                entity.tile_mask = Some(mask);
            }
        }
    }
}
