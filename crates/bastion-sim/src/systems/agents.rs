//! Free agents: age them and ask idle ones for a decision.

use tracing::warn;

use bastion_core::types::EntityId;

use crate::actions;
use crate::decision::DecisionHook;
use crate::world::World;

pub fn run(world: &mut World, hook: &mut dyn DecisionHook) {
    let dt = world.time_since_last_tick;
    let ids: Vec<EntityId> = world.agents.iter().copied().collect();

    for id in ids {
        let Some(entity) = world.get_mut(id) else {
            warn!(%id, "stale agent id; skipping");
            continue;
        };
        entity.age += dt;
        if !entity.actions.is_empty() {
            continue;
        }
        if let Some(agent) = entity.agent.as_mut() {
            agent.time_on_task += dt;
        }

        hook.decide(world, id);

        let Some(entity) = world.get_mut(id) else {
            continue;
        };
        if entity.actions.is_empty() {
            continue;
        }
        if let Some(agent) = entity.agent.as_mut() {
            agent.time_on_task = 0.0;
        }
        if let Err(err) = actions::start_immediate(world, id) {
            warn!(%id, %err, "decision start failed");
        }
    }
}
