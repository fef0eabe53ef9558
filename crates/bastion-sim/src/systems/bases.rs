//! Base idle pass: turrets with nothing to aim at stop turning.

use tracing::warn;

use bastion_core::types::EntityId;

use crate::world::World;

pub fn run(world: &mut World) {
    let has_crosshair = world.crosshair.is_some();
    let ids: Vec<EntityId> = world.bases.iter().copied().collect();
    for id in ids {
        let Some(entity) = world.get_mut(id) else {
            warn!(%id, "stale base id; skipping");
            continue;
        };
        let busy = !entity.actions.is_empty();
        if let Some(turret) = entity.turret.as_mut() {
            if !has_crosshair && !busy && turret.target_queue.is_empty() {
                turret.theta_speed = 0.0;
            }
        }
    }
}
