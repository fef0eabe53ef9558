//! Entity record and its optional component sub-structures.
//!
//! Components are plain data. The behavior that drives them (the action
//! state machine, targeting, ballistics) lives in bastion-sim.

use std::collections::VecDeque;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EntityId, PlayerId};

/// Action-specific data carried alongside the type tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum ActionPayload {
    #[default]
    None,
    Move {
        next_pos: DVec2,
    },
    MoveTurn {
        next_pos: DVec2,
        next_theta: f64,
    },
    Turn {
        theta: f64,
    },
    Shoot {
        theta: f64,
        projectile: ProjectileKind,
        target_pos: Option<DVec2>,
    },
}

/// A timed behavior on an entity's action queue.
///
/// `remaining` counts down from `duration` and never goes below zero.
/// The one-shot effect fires once `duration - remaining >= effect_offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    /// Total duration of this instance (ms).
    pub duration: f64,
    /// Time left (ms).
    pub remaining: f64,
    /// Elapsed time (ms) at which the effect fires.
    pub effect_offset: f64,
    pub effect_applied: bool,
    pub payload: ActionPayload,
}

/// A queued aim request, typically produced by drag input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetRequest {
    pub position: DVec2,
    pub projectile: ProjectileKind,
}

/// Turret state for tower entities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Turret {
    /// Base angular step per tick (radians).
    pub max_theta_speed: f64,
    /// Signed step applied last tick.
    pub theta_speed: f64,
    pub target_queue: VecDeque<TargetRequest>,
}

/// Detonation payload of a guided projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Warhead {
    /// Fixed target; `None` follows the live crosshair.
    pub target: Option<DVec2>,
    /// Blast radius on detonation (0 = no blast).
    pub blast_radius: f64,
}

/// Projectile flight state. Position is a closed-form function of `age`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallisticState {
    pub projectile: ProjectileKind,
    pub initial_position: DVec2,
    pub initial_theta: f64,
    pub velocity: f64,
    /// Accumulated elapsed time (ms).
    pub age: f64,
    pub gravity: f64,
    pub damage: f64,
    /// Precise (unrounded) top-left position along the trajectory.
    pub position: DVec2,
    pub blocking: Vec<EntityKind>,
    pub warhead: Option<Warhead>,
    /// Piercing projectiles spend their hp as durability.
    pub piercing: bool,
    pub miss_rate: Option<f64>,
    /// Set when the projectile reached its warhead target.
    pub reached_target: bool,
}

/// Pheromone source configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Emitter {
    pub pheromone: PheromoneKind,
    pub quantity: f64,
    /// Refresh period in ticks; `None` never refreshes.
    pub refresh_rate: Option<u64>,
}

/// Bookkeeping for decision-making agents.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AgentState {
    /// Time spent idle waiting for a decision (ms).
    pub time_on_task: f64,
}

/// Fused explosive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosive {
    /// Fuse length (ms); `None` detonates on the next pass.
    pub timer: Option<f64>,
    pub radius: f64,
    pub damage: f64,
}

/// Free-spinning decoration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rotor {
    pub max_theta_speed: f64,
}

/// The fixed entity record. Optional sub-structures are present according
/// to `kind` (see `bastion_sim::factory`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub owner: Option<PlayerId>,
    /// Top-left corner, cell-aligned.
    pub position: DVec2,
    pub prev_position: DVec2,
    pub width: f64,
    pub height: f64,
    pub hp: f64,
    pub max_hp: f64,
    pub theta: f64,
    pub prev_theta: f64,
    /// Accumulated lifetime (ms).
    pub age: f64,
    pub actions: VecDeque<Action>,
    pub prev_action: Option<ActionKind>,
    /// Ticks movement input has been held since the last issued move.
    pub time_on_move: u32,
    pub explosion_immune: bool,
    /// Same-kind neighbour mask (up=1, right=2, down=4, left=8).
    pub tile_mask: Option<u8>,

    pub turret: Option<Turret>,
    pub ballistic: Option<BallisticState>,
    pub emitter: Option<Emitter>,
    pub agent: Option<AgentState>,
    pub explosive: Option<Explosive>,
    pub rotor: Option<Rotor>,
    pub upgrade: Option<UpgradeKind>,
}

impl Entity {
    /// Centre of the footprint.
    pub fn center(&self) -> DVec2 {
        self.position + DVec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Timed advisory message for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub message: String,
    pub time_ms: f64,
    pub max_ms: f64,
}

/// Global upgrade levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrades {
    pub fire_rate: u32,
    pub turn_rate: u32,
    pub damage: u32,
}

impl Upgrades {
    pub fn level(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::FireRate => self.fire_rate,
            UpgradeKind::TurnRate => self.turn_rate,
            UpgradeKind::Damage => self.damage,
        }
    }

    pub fn grant(&mut self, kind: UpgradeKind) {
        match kind {
            UpgradeKind::FireRate => self.fire_rate += 1,
            UpgradeKind::TurnRate => self.turn_rate += 1,
            UpgradeKind::Damage => self.damage += 1,
        }
    }
}

/// Held movement keys for the controlled entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeysDown {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl KeysDown {
    /// Unit-step direction from held keys (up is +y).
    pub fn direction(&self) -> DVec2 {
        let mut dir = DVec2::ZERO;
        if self.up {
            dir.y += 1.0;
        }
        if self.down {
            dir.y -= 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}
