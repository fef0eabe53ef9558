//! World snapshot handed to the renderer after each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::components::{Ticker, Upgrades};
use crate::enums::*;
use crate::types::{EntityId, SimTime};

/// Complete visible state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub money: u32,
    pub view_pos: DVec2,
    pub crosshair: Option<DVec2>,
    pub place_type: ProjectileKind,
    pub ticker: Option<Ticker>,
    pub mini_ticker: Option<Ticker>,
    pub upgrades: Upgrades,
    pub game_over: bool,
    pub entities: Vec<EntityView>,
}

/// One live entity as the renderer sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: DVec2,
    pub width: f64,
    pub height: f64,
    pub hp: f64,
    pub theta: f64,
    /// Turret turn applied last tick; 0 for entities without a turret.
    pub theta_speed: f64,
    pub action: Option<ActionKind>,
    pub tile_mask: Option<u8>,
}
