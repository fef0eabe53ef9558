//! One-shot action effects.
//!
//! An effect runs exactly once per action instance, when the action's
//! elapsed time first reaches its effect offset.

use glam::DVec2;
use tracing::{debug, trace};

use bastion_core::components::{Action, ActionPayload};
use bastion_core::enums::*;
use bastion_core::stats::entity_stats;
use bastion_core::types::{cell_of, EntityId};

use crate::actions::{is_action_queued, make_action, queue_action};
use crate::error::SimError;
use crate::factory::{spawn_ballistic, Launch};
use crate::world::World;

pub fn apply(world: &mut World, id: EntityId, action: &Action) -> Result<(), SimError> {
    match action.payload {
        ActionPayload::Move { next_pos } => move_to(world, id, next_pos, None),
        ActionPayload::MoveTurn {
            next_pos,
            next_theta,
        } => move_to(world, id, next_pos, Some(next_theta)),
        ActionPayload::Turn { theta } => {
            let entity = world.entity_mut(id)?;
            entity.prev_theta = entity.theta;
            entity.theta = theta;
            Ok(())
        }
        ActionPayload::Shoot {
            theta,
            projectile,
            target_pos,
        } => shoot(world, id, theta, projectile, target_pos),
        ActionPayload::None if action.kind == ActionKind::Die => die(world, id),
        ActionPayload::None => Ok(()),
    }
}

fn move_to(
    world: &mut World,
    id: EntityId,
    next_pos: DVec2,
    theta: Option<f64>,
) -> Result<(), SimError> {
    let entity = world.entity(id)?;
    if !world.contains_footprint(next_pos, entity.width, entity.height) {
        return Err(SimError::OutOfBounds { position: next_pos });
    }
    world.move_entity(id, next_pos)?;
    if let Some(theta) = theta {
        let entity = world.entity_mut(id)?;
        entity.prev_theta = entity.theta;
        entity.theta = theta;
    }
    Ok(())
}

/// Launch a projectile from the shooter's centre.
fn shoot(
    world: &mut World,
    id: EntityId,
    theta: f64,
    projectile: ProjectileKind,
    target: Option<DVec2>,
) -> Result<(), SimError> {
    let shooter = world.entity(id)?;
    let size = entity_stats(EntityKind::Ballistic);
    let position = shooter.center() - DVec2::new(size.width, size.height) / 2.0;
    let launch = Launch {
        projectile,
        position,
        theta,
        owner: shooter.owner,
        target,
    };
    let ballistic = spawn_ballistic(world, launch);
    trace!(shooter = %id, %ballistic, ?projectile, "fired");
    Ok(())
}

fn die(world: &mut World, id: EntityId) -> Result<(), SimError> {
    let entity = world.entity(id)?;
    let center = entity.center();
    let kind = entity.kind;
    let explosive = entity.explosive;
    let upgrade = entity.upgrade;
    let ballistic = entity
        .ballistic
        .as_ref()
        .map(|b| (b.projectile, b.reached_target, b.warhead, b.position));

    match kind {
        EntityKind::Ballistic => {
            if let Some((projectile, reached, warhead, position)) = ballistic {
                if projectile == ProjectileKind::Stone && reached {
                    let target = warhead.and_then(|w| w.target).unwrap_or(position);
                    if settle_stone(world, id, target)? {
                        return Ok(());
                    }
                }
                if let Some(warhead) = warhead.filter(|w| w.blast_radius > 0.0) {
                    let damage = entity_damage(world, id);
                    explode(world, id, center, warhead.blast_radius, damage);
                }
            }
        }
        EntityKind::Dynamite => {
            if let Some(explosive) = explosive {
                explode(world, id, center, explosive.radius, explosive.damage);
            }
        }
        EntityKind::Upgrade => {
            if let Some(upgrade) = upgrade {
                world.upgrades.grant(upgrade);
                debug!(?upgrade, level = world.upgrades.level(upgrade), "upgrade granted");
            }
        }
        EntityKind::Base => {
            world.game_over = true;
            debug!(%id, "base destroyed");
        }
        _ => {}
    }

    world.remove(id)?;
    Ok(())
}

fn entity_damage(world: &World, id: EntityId) -> f64 {
    world
        .get(id)
        .and_then(|e| e.ballistic.as_ref())
        .map_or(0.0, |b| b.damage)
}

/// Turn a landed Stone projectile into a Stone block. Returns false when
/// the target cell already holds a Stone, leaving the projectile to die.
fn settle_stone(world: &mut World, id: EntityId, target: DVec2) -> Result<bool, SimError> {
    let cell = cell_of(target);
    let occupied = !world.contains_cell(cell)
        || world
            .entities_at(cell)
            .any(|e| e.kind == EntityKind::Stone && e.id != id);
    if occupied {
        return Ok(false);
    }

    let stats = entity_stats(EntityKind::Stone);
    world.retype(id, EntityKind::Stone, |e| {
        e.position = cell.as_dvec2();
        e.prev_position = e.position;
        e.width = stats.width;
        e.height = stats.height;
        e.hp = stats.hp;
        e.max_hp = stats.hp;
        e.theta = 0.0;
        e.owner = None;
        e.ballistic = None;
        e.tile_mask = Some(0);
    })?;
    trace!(%id, ?cell, "stone settled");
    Ok(true)
}

/// Damage everything within `radius` of `center` that is not immune.
/// Explosives caught in the blast are set off.
fn explode(world: &mut World, source: EntityId, center: DVec2, radius: f64, damage: f64) {
    let caught: Vec<EntityId> = world
        .iter()
        .filter(|e| {
            e.id != source
                && !e.explosion_immune
                && e.kind != EntityKind::Ballistic
                && e.center().distance(center) <= radius
        })
        .map(|e| e.id)
        .collect();
    debug!(%source, radius, victims = caught.len(), "explosion");

    for victim in caught {
        if let Err(err) = world.deal_damage(victim, damage) {
            debug!(%victim, %err, "blast victim gone");
            continue;
        }
        let Some(entity) = world.get(victim) else {
            continue;
        };
        if entity.explosive.is_some() && !is_action_queued(entity, ActionKind::Die) {
            let die = make_action(entity.kind, ActionKind::Die, ActionPayload::None);
            if let Err(err) = queue_action(world, victim, die) {
                debug!(%victim, %err, "chain detonation dropped");
            }
        }
    }
}
