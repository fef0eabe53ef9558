//! Snapshot system: builds the renderer's view of the world.
//!
//! This system is read-only; it never modifies the world.

use bastion_core::state::{EntityView, WorldSnapshot};
use bastion_core::types::SimTime;

use crate::world::World;

pub fn build_snapshot(world: &World) -> WorldSnapshot {
    WorldSnapshot {
        time: SimTime {
            tick: world.time,
            total_ms: world.total_game_time,
        },
        money: world.money,
        view_pos: world.view_pos,
        crosshair: world.crosshair,
        place_type: world.place_type,
        ticker: world.ticker.clone(),
        mini_ticker: world.mini_ticker.clone(),
        upgrades: world.upgrades,
        game_over: world.game_over,
        entities: world
            .iter()
            .map(|e| EntityView {
                id: e.id,
                kind: e.kind,
                position: e.position,
                width: e.width,
                height: e.height,
                hp: e.hp,
                theta: e.theta,
                theta_speed: e.turret.as_ref().map_or(0.0, |t| t.theta_speed),
                action: e.actions.front().map(|a| a.kind),
                tile_mask: e.tile_mask,
            })
            .collect(),
    }
}
