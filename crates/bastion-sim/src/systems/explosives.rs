//! Explosive fuses.

use tracing::{trace, warn};

use bastion_core::components::ActionPayload;
use bastion_core::enums::ActionKind;
use bastion_core::types::EntityId;

use crate::actions::{is_action_queued, make_action, queue_action};
use crate::world::World;

/// Burn down fuses; a spent (or absent) fuse queues the explosive's DIE.
pub fn run(world: &mut World) {
    let dt = world.time_since_last_tick;
    let ids: Vec<EntityId> = world.explosives.iter().copied().collect();

    for id in ids {
        let Some(entity) = world.get_mut(id) else {
            warn!(%id, "stale explosive id; skipping");
            continue;
        };
        if is_action_queued(entity, ActionKind::Die) {
            continue;
        }
        let Some(explosive) = entity.explosive.as_mut() else {
            continue;
        };
        let lit = match explosive.timer.as_mut() {
            Some(timer) => {
                *timer -= dt;
                *timer <= 0.0
            }
            None => true,
        };
        if lit {
            trace!(%id, "fuse spent");
            let die = make_action(entity.kind, ActionKind::Die, ActionPayload::None);
            if let Err(err) = queue_action(world, id, die) {
                warn!(%id, %err, "detonation dropped");
            }
        }
    }
}
