//! Camera tracking of the focused entity.

use glam::DVec2;
use tracing::warn;

use bastion_core::constants::CAMERA_SMOOTHING_RATE;
use bastion_core::enums::{ActionKind, CameraMode};
use bastion_core::stats::action_timing;
use bastion_core::types::round_hundredths;

use crate::world::World;

pub fn run(world: &mut World) {
    let Some(id) = world.focused else {
        return;
    };
    if !world.contains(id) {
        warn!(%id, "focused entity is gone");
        world.focused = None;
        return;
    }
    let Some(entity) = world.get(id) else {
        return;
    };

    let view = DVec2::new(world.view_width, world.view_height);
    let next = match entity.actions.front() {
        Some(action) if action.kind.is_motion() => follow_step(
            world.view_pos,
            entity.position - entity.prev_position,
            world.time_since_last_tick,
            action.duration,
        ),
        Some(_) => return,
        None => {
            let ideal = entity.center() - view / 2.0;
            let move_duration = action_timing(entity.kind, ActionKind::Move).duration;
            ease_step(world.view_pos, ideal, move_duration)
        }
    };

    world.view_pos = match world.camera_mode {
        CameraMode::FreeRoam => next,
        CameraMode::Locked => {
            let grid = DVec2::new(world.grid_width() as f64, world.grid_height() as f64);
            next.clamp(DVec2::ZERO, (grid - view).max(DVec2::ZERO))
        }
    };
}

/// Share of a move's displacement covered by this tick.
pub fn follow_step(camera: DVec2, delta: DVec2, elapsed: f64, duration: f64) -> DVec2 {
    let share = if duration > 0.0 {
        (elapsed / duration).min(1.0)
    } else {
        1.0
    };
    round_hundredths(camera + delta * share)
}

/// Exponential smoothing toward the ideal framing.
pub fn ease_step(camera: DVec2, ideal: DVec2, move_duration: f64) -> DVec2 {
    round_hundredths(camera + (ideal - camera) * (CAMERA_SMOOTHING_RATE / move_duration))
}
