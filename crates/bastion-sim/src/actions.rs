//! Per-entity action queue and its state machine.
//!
//! The head of an entity's queue is the active action. Each tick the head
//! either fires its one-shot effect, completes (handing off to the next
//! action or the decision hook), or simply runs down its remaining time.

use tracing::debug;

use bastion_core::components::{Action, ActionPayload, Entity};
use bastion_core::enums::{ActionKind, EntityKind};
use bastion_core::stats::action_timing;
use bastion_core::types::EntityId;

use crate::decision::DecisionHook;
use crate::effects;
use crate::error::SimError;
use crate::world::World;

/// Build a fresh action with the timing configured for this entity kind.
pub fn make_action(kind: EntityKind, action: ActionKind, payload: ActionPayload) -> Action {
    let timing = action_timing(kind, action);
    Action {
        kind: action,
        duration: timing.duration,
        remaining: timing.duration,
        effect_offset: timing.effect_offset,
        effect_applied: false,
        payload,
    }
}

/// Divide an action's timeline by `divisor`. Duration, remaining time and
/// effect offset shrink together so the effect still lands mid-animation.
pub fn shorten(action: &mut Action, divisor: f64) {
    if divisor <= 0.0 {
        return;
    }
    action.duration /= divisor;
    action.remaining /= divisor;
    action.effect_offset /= divisor;
}

/// Append an action to the back of an entity's queue.
pub fn queue_action(world: &mut World, id: EntityId, action: Action) -> Result<(), SimError> {
    world.entity_mut(id)?.actions.push_back(action);
    world.actors.insert(id);
    Ok(())
}

/// Interrupt the current action by pushing a new head. The interrupted
/// action keeps its state and resumes once the new one completes.
pub fn stack_action(world: &mut World, id: EntityId, action: Action) -> Result<(), SimError> {
    world.entity_mut(id)?.actions.push_front(action);
    world.actors.insert(id);
    Ok(())
}

/// Remove every queued action matching `pred`. Effects that already fired
/// stay fired. Returns the number of actions removed.
pub fn cancel_actions(
    world: &mut World,
    id: EntityId,
    mut pred: impl FnMut(&Action) -> bool,
) -> Result<usize, SimError> {
    let entity = world.entity_mut(id)?;
    let before = entity.actions.len();
    entity.actions.retain(|action| !pred(action));
    Ok(before - entity.actions.len())
}

pub fn is_action_queued(entity: &Entity, kind: ActionKind) -> bool {
    entity.actions.iter().any(|action| action.kind == kind)
}

/// Advance one entity's action queue by the current tick.
pub fn step_action(
    world: &mut World,
    id: EntityId,
    hook: &mut dyn DecisionHook,
) -> Result<(), SimError> {
    let dt = world.time_since_last_tick;
    let Some(head) = world.entity(id)?.actions.front() else {
        return Ok(());
    };
    let elapsed = head.duration - head.remaining;
    let effect_due = elapsed >= head.effect_offset && !head.effect_applied;
    let finished = head.remaining <= 0.0;

    if effect_due {
        fire_head_effect(world, id)?;
    } else if finished {
        let entity = world.entity_mut(id)?;
        if let Some(done) = entity.actions.pop_front() {
            entity.prev_action = Some(done.kind);
        }
        if entity.actions.is_empty() && entity.agent.is_some() {
            hook.decide(world, id);
        }
        start_immediate(world, id)?;
    }

    // The entity may have been removed by its own effect.
    if let Some(head) = world.get_mut(id).and_then(|e| e.actions.front_mut()) {
        head.remaining = (head.remaining - dt).max(0.0);
    }
    Ok(())
}

/// Fire the head action's effect now if it has a zero offset. Used right
/// after a hand-off so zero-delay effects do not wait a tick.
pub fn start_immediate(world: &mut World, id: EntityId) -> Result<(), SimError> {
    let ready = world
        .get(id)
        .and_then(|e| e.actions.front())
        .is_some_and(|head| head.effect_offset <= 0.0 && !head.effect_applied);
    if ready {
        fire_head_effect(world, id)?;
    }
    Ok(())
}

/// Mark the head applied, then run its effect.
fn fire_head_effect(world: &mut World, id: EntityId) -> Result<(), SimError> {
    let entity = world.entity_mut(id)?;
    let Some(head) = entity.actions.front_mut() else {
        return Ok(());
    };
    head.effect_applied = true;
    let action = head.clone();

    if let Err(err) = effects::apply(world, id, &action) {
        debug!(%id, kind = ?action.kind, %err, "action effect skipped");
    }
    Ok(())
}
