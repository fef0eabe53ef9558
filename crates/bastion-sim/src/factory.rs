//! Entity spawn factories.
//!
//! Each factory assembles the fixed entity record with the optional
//! components its kind calls for and inserts it into the world.

use std::collections::VecDeque;

use glam::DVec2;

use bastion_core::components::*;
use bastion_core::constants::*;
use bastion_core::enums::*;
use bastion_core::stats::*;
use bastion_core::types::{EntityId, PlayerId};

use crate::world::World;

/// Set up a default level: one player base in the lower middle, a dirt
/// wall, a food patch, a farm, some dynamite, monsters and an upgrade.
pub fn setup_level(world: &mut World) {
    let w = world.grid_width() as f64;
    let h = world.grid_height() as f64;
    let base_pos = DVec2::new((w / 2.0 - 1.5).floor(), 2.0);
    spawn_base(world, base_pos, PLAYER_ID);

    for x in 10..(w as i32 - 10) {
        spawn_collectable(world, EntityKind::Dirt, DVec2::new(x as f64, (h / 2.0).floor()));
    }
    for x in 4..8 {
        for y in 4..6 {
            spawn_collectable(world, EntityKind::Food, DVec2::new(x as f64, y as f64));
        }
    }
    spawn_farm(world, DVec2::new(base_pos.x + 6.0, 2.0), PLAYER_ID);
    spawn_dynamite(world, DVec2::new(w - 8.0, h / 2.0 + 3.0), None);

    for i in 0..4 {
        let x = 8.0 + i as f64 * (w - 16.0) / 3.0;
        spawn_monster(world, DVec2::new(x.floor(), h - 6.0), ENEMY_ID);
    }
    spawn_upgrade(
        world,
        DVec2::new((w / 2.0).floor(), h - 10.0),
        UpgradeKind::FireRate,
    );
}

/// Blank record sized and scored from the kind's stat table.
fn blank(kind: EntityKind, position: DVec2, owner: Option<PlayerId>) -> Entity {
    let stats = entity_stats(kind);
    Entity {
        id: EntityId::new(0, 0),
        kind,
        owner,
        position,
        prev_position: position,
        width: stats.width,
        height: stats.height,
        hp: stats.hp,
        max_hp: stats.hp,
        theta: 0.0,
        prev_theta: 0.0,
        age: 0.0,
        actions: VecDeque::new(),
        prev_action: None,
        time_on_move: 0,
        explosion_immune: false,
        tile_mask: None,
        turret: None,
        ballistic: None,
        emitter: None,
        agent: None,
        explosive: None,
        rotor: None,
        upgrade: None,
    }
}

/// Spawn a player base: tower, emitter, explosion-immune.
pub fn spawn_base(world: &mut World, position: DVec2, owner: PlayerId) -> EntityId {
    let mut entity = blank(EntityKind::Base, position, Some(owner));
    entity.explosion_immune = true;
    entity.turret = Some(Turret {
        max_theta_speed: BASE_MAX_THETA_SPEED,
        ..Default::default()
    });
    entity.emitter = Some(Emitter {
        pheromone: PheromoneKind::Colony,
        quantity: BASE_EMITTER_QUANTITY,
        refresh_rate: Some(BASE_EMITTER_REFRESH),
    });
    world.spawn(entity)
}

pub fn spawn_monster(world: &mut World, position: DVec2, owner: PlayerId) -> EntityId {
    let mut entity = blank(EntityKind::Monster, position, Some(owner));
    entity.agent = Some(AgentState::default());
    world.spawn(entity)
}

/// Spawn a wandering upgrade that grants `kind` when destroyed.
pub fn spawn_upgrade(world: &mut World, position: DVec2, kind: UpgradeKind) -> EntityId {
    let mut entity = blank(EntityKind::Upgrade, position, None);
    entity.agent = Some(AgentState::default());
    entity.upgrade = Some(kind);
    world.spawn(entity)
}

/// Spawn a Food, Dirt or Stone tile.
pub fn spawn_collectable(world: &mut World, kind: EntityKind, position: DVec2) -> EntityId {
    debug_assert!(kind.is_collectable());
    let mut entity = blank(kind, position, None);
    entity.tile_mask = Some(0);
    world.spawn(entity)
}

pub fn spawn_farm(world: &mut World, position: DVec2, owner: PlayerId) -> EntityId {
    let mut entity = blank(EntityKind::Farm, position, Some(owner));
    entity.rotor = Some(Rotor {
        max_theta_speed: FARM_THETA_SPEED,
    });
    world.spawn(entity)
}

/// Spawn dynamite. `timer` of `None` uses the default fuse.
pub fn spawn_dynamite(world: &mut World, position: DVec2, timer: Option<f64>) -> EntityId {
    let mut entity = blank(EntityKind::Dynamite, position, None);
    entity.explosive = Some(Explosive {
        timer: Some(timer.unwrap_or(DYNAMITE_FUSE_MS)),
        radius: DYNAMITE_RADIUS,
        damage: DYNAMITE_DAMAGE,
    });
    world.spawn(entity)
}

/// Launch parameters for a new projectile.
#[derive(Debug, Clone, Copy)]
pub struct Launch {
    pub projectile: ProjectileKind,
    /// Top-left corner of the projectile at launch.
    pub position: DVec2,
    pub theta: f64,
    pub owner: Option<PlayerId>,
    /// Fixed warhead target; `None` follows the crosshair.
    pub target: Option<DVec2>,
}

/// Spawn a projectile. Damage includes the current DAMAGE upgrade bonus.
pub fn spawn_ballistic(world: &mut World, launch: Launch) -> EntityId {
    let stats = projectile_stats(launch.projectile);
    let mut entity = blank(EntityKind::Ballistic, launch.position, launch.owner);
    entity.hp = stats.hp;
    entity.max_hp = stats.hp;
    entity.theta = launch.theta;
    entity.prev_theta = launch.theta;
    entity.ballistic = Some(BallisticState {
        projectile: launch.projectile,
        initial_position: launch.position,
        initial_theta: launch.theta,
        velocity: stats.velocity,
        age: 0.0,
        gravity: world.gravity * stats.gravity_scale,
        damage: stats.damage
            + DAMAGE_UPGRADE_BONUS * world.upgrades.level(UpgradeKind::Damage) as f64,
        position: launch.position,
        blocking: stats.blocking.to_vec(),
        warhead: stats.warhead_radius.map(|blast_radius| Warhead {
            target: launch.target,
            blast_radius,
        }),
        piercing: stats.piercing,
        miss_rate: stats.miss_rate,
        reached_target: false,
    });
    world.spawn(entity)
}
