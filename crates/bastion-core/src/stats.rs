//! Static stat tables per entity kind, action, and projectile type.

use crate::enums::*;

/// Footprint and durability of an entity kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityStats {
    pub width: f64,
    pub height: f64,
    pub hp: f64,
}

/// Duration and effect offset (both ms) of an action on an entity kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionTiming {
    pub duration: f64,
    pub effect_offset: f64,
}

/// Flight characteristics of a projectile type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileStats {
    pub cost: u32,
    pub velocity: f64,
    pub damage: f64,
    /// Multiplier on configured gravity. Guided warheads fly flat.
    pub gravity_scale: f64,
    /// Hit points; the durability budget of piercing projectiles.
    pub hp: f64,
    pub piercing: bool,
    pub miss_rate: Option<f64>,
    /// `Some(radius)` marks a warhead.
    pub warhead_radius: Option<f64>,
    /// At most one entity of the resulting category may occupy the target cell.
    pub occupancy_sensitive: bool,
    pub blocking: &'static [EntityKind],
}

const SHOT_BLOCKING: &[EntityKind] = &[
    EntityKind::Food,
    EntityKind::Dirt,
    EntityKind::Stone,
    EntityKind::Monster,
    EntityKind::Upgrade,
    EntityKind::Dynamite,
    EntityKind::Farm,
    EntityKind::Base,
];

const LOB_BLOCKING: &[EntityKind] = &[EntityKind::Monster, EntityKind::Upgrade, EntityKind::Base];

pub fn entity_stats(kind: EntityKind) -> EntityStats {
    let (width, height, hp) = match kind {
        EntityKind::Base => (3.0, 3.0, 500.0),
        EntityKind::Ballistic => (1.0, 1.0, 1.0),
        EntityKind::Monster => (2.0, 2.0, 40.0),
        EntityKind::Upgrade => (2.0, 2.0, 5.0),
        EntityKind::Food | EntityKind::Dirt | EntityKind::Stone => (1.0, 1.0, 40.0),
        EntityKind::Farm => (2.0, 2.0, 100.0),
        EntityKind::Dynamite => (1.0, 1.0, 10.0),
    };
    EntityStats { width, height, hp }
}

pub fn action_timing(kind: EntityKind, action: ActionKind) -> ActionTiming {
    let (duration, effect_offset) = match (kind, action) {
        (EntityKind::Base, ActionKind::Move) => (180.0, 0.0),
        (EntityKind::Base, ActionKind::Shoot) => (1000.0, 100.0),
        (EntityKind::Monster, ActionKind::Move) => (200.0, 0.0),
        (EntityKind::Monster, ActionKind::Die) => (300.0, 300.0),
        (EntityKind::Upgrade, ActionKind::Move) => (246.0, 0.0),
        (EntityKind::Dynamite, ActionKind::Die) => (300.0, 0.0),
        (_, ActionKind::Move) => (200.0, 0.0),
        (_, ActionKind::MoveTurn) => (250.0, 0.0),
        (_, ActionKind::Turn) => (120.0, 0.0),
        (_, ActionKind::Shoot) => (500.0, 0.0),
        (_, ActionKind::Die) => (1.0, 0.0),
    };
    ActionTiming {
        duration,
        effect_offset,
    }
}

pub fn projectile_stats(kind: ProjectileKind) -> ProjectileStats {
    match kind {
        ProjectileKind::Bullet => ProjectileStats {
            cost: 0,
            velocity: 80.0,
            damage: 10.0,
            gravity_scale: 1.0,
            hp: 1.0,
            piercing: false,
            miss_rate: None,
            warhead_radius: None,
            occupancy_sensitive: false,
            blocking: SHOT_BLOCKING,
        },
        ProjectileKind::Piercer => ProjectileStats {
            cost: 5,
            velocity: 90.0,
            damage: 15.0,
            gravity_scale: 1.0,
            hp: 3.0,
            piercing: true,
            miss_rate: None,
            warhead_radius: None,
            occupancy_sensitive: false,
            blocking: SHOT_BLOCKING,
        },
        ProjectileKind::Missile => ProjectileStats {
            cost: 20,
            velocity: 40.0,
            damage: 30.0,
            gravity_scale: 0.0,
            hp: 1.0,
            piercing: false,
            miss_rate: Some(0.1),
            warhead_radius: Some(3.0),
            occupancy_sensitive: false,
            blocking: SHOT_BLOCKING,
        },
        ProjectileKind::Stone => ProjectileStats {
            cost: 10,
            velocity: 60.0,
            damage: 5.0,
            gravity_scale: 0.0,
            hp: 1.0,
            piercing: false,
            miss_rate: None,
            warhead_radius: Some(0.0),
            occupancy_sensitive: true,
            blocking: LOB_BLOCKING,
        },
    }
}

/// Base turret turn step (radians per tick).
pub const BASE_MAX_THETA_SPEED: f64 = 0.04;

/// Farm rotor step (radians per tick).
pub const FARM_THETA_SPEED: f64 = 0.03;

/// Dynamite fuse (ms), blast radius (cells), and blast damage.
pub const DYNAMITE_FUSE_MS: f64 = 2000.0;
pub const DYNAMITE_RADIUS: f64 = 3.0;
pub const DYNAMITE_DAMAGE: f64 = 50.0;

/// Base emitter output and refresh period (ticks).
pub const BASE_EMITTER_QUANTITY: f64 = 120.0;
pub const BASE_EMITTER_REFRESH: u64 = 20;
