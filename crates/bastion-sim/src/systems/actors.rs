//! Action state machine pass over every entity with queued actions.

use tracing::warn;

use bastion_core::types::EntityId;

use crate::actions;
use crate::decision::DecisionHook;
use crate::world::World;

/// Step every actor. Entities whose queues emptied are dropped from the
/// actor set after the pass, unless something queued for them meanwhile.
pub fn run(world: &mut World, hook: &mut dyn DecisionHook) {
    let ids: Vec<EntityId> = world.actors.iter().copied().collect();
    let mut idle = Vec::new();

    for id in ids {
        if !world.contains(id) {
            warn!(%id, "stale actor id; skipping");
            idle.push(id);
            continue;
        }
        if let Err(err) = actions::step_action(world, id, hook) {
            warn!(%id, %err, "actor step failed");
        }
        if world.get(id).is_some_and(|e| e.actions.is_empty()) {
            idle.push(id);
        }
    }

    for id in idle {
        if world.get(id).map_or(true, |e| e.actions.is_empty()) {
            world.actors.remove(&id);
        }
    }
}
