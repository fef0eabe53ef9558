//! Player-controlled entity: turn held movement keys into motion actions.
//!
//! A fresh key press facing a new direction turns in place first; holding
//! the key longer moves and turns together.

use glam::DVec2;
use tracing::warn;

use bastion_core::components::ActionPayload;
use bastion_core::enums::ActionKind;
use bastion_core::types::heading_of;

use crate::actions::{make_action, queue_action};
use crate::world::World;

/// Queue a one-cell move (or turn) for the controlled entity when a key is
/// held and no motion or turn action is already queued.
pub fn run(world: &mut World) {
    let Some(id) = world.controlled else {
        return;
    };
    if !world.contains(id) {
        warn!(%id, "controlled entity is gone");
        world.controlled = None;
        return;
    }
    let direction = world.keys_down.direction();
    let Some(entity) = world.get_mut(id) else {
        return;
    };

    if direction == DVec2::ZERO {
        entity.time_on_move = 0;
        return;
    }
    entity.time_on_move += 1;
    let busy = entity
        .actions
        .iter()
        .any(|a| a.kind.is_motion() || a.kind == ActionKind::Turn);
    if busy {
        return;
    }

    let next_pos = entity.position + direction;
    let theta = heading_of(direction);
    let action = if theta == entity.theta {
        make_action(entity.kind, ActionKind::Move, ActionPayload::Move { next_pos })
    } else if entity.time_on_move > 1 {
        make_action(
            entity.kind,
            ActionKind::MoveTurn,
            ActionPayload::MoveTurn {
                next_pos,
                next_theta: theta,
            },
        )
    } else {
        make_action(entity.kind, ActionKind::Turn, ActionPayload::Turn { theta })
    };
    entity.time_on_move = 0;
    if let Err(err) = queue_action(world, id, action) {
        warn!(%id, %err, "controlled move dropped");
    }
}
