//! Tower targeting: pick a target, turn toward it, fire when lined up.
//!
//! A tower's own target queue takes priority over the shared crosshair.
//! At most one queued request is consumed per tick, and a request that
//! could not be fired goes back to the front of the queue.

use std::f64::consts::PI;

use glam::DVec2;
use tracing::{debug, warn};

use bastion_core::components::{ActionPayload, TargetRequest};
use bastion_core::constants::{QUEUED_SHOT_SPEEDUP, TURN_RATE_UPGRADE_BONUS};
use bastion_core::enums::*;
use bastion_core::stats::projectile_stats;
use bastion_core::types::{cell_of, heading_of, normalize_angle, EntityId};

use crate::actions::{is_action_queued, make_action, queue_action, shorten};
use crate::error::SimError;
use crate::world::World;

/// Result of one turn step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnStep {
    pub theta: f64,
    /// Signed angle applied this tick.
    pub speed: f64,
    /// Heading matches the target exactly.
    pub ready: bool,
}

/// Rotate `current` toward `target` (both in `[0, 2π)`) by at most
/// `max_step`, along the shorter arc.
pub fn turn_toward(current: f64, target: f64, max_step: f64) -> TurnStep {
    let d = target - current;
    if d.abs() <= max_step {
        return TurnStep {
            theta: target,
            speed: d,
            ready: true,
        };
    }

    let speed = if d > 0.0 && d <= PI {
        max_step
    } else if d < -PI {
        // Shorter to go forward through zero.
        max_step
    } else {
        debug_assert!(
            (-PI..0.0).contains(&d) || d > PI,
            "turn case not covered: current={current} target={target}"
        );
        -max_step
    };
    TurnStep {
        theta: normalize_angle(current + speed),
        speed,
        ready: false,
    }
}

pub fn run(world: &mut World) {
    let ids: Vec<EntityId> = world.towers.iter().copied().collect();
    for id in ids {
        if let Err(err) = aim_and_fire(world, id) {
            warn!(%id, %err, "tower skipped");
        }
    }
}

fn aim_and_fire(world: &mut World, id: EntityId) -> Result<(), SimError> {
    let crosshair = world.crosshair;
    let place_type = world.place_type;
    let upgrades = world.upgrades;

    // 1. Target: own queue first, then the crosshair.
    let entity = world.entity_mut(id)?;
    let center = entity.center();
    let Some(turret) = entity.turret.as_mut() else {
        return Ok(());
    };
    let request = turret.target_queue.pop_front();
    let (target, projectile) = match (request, crosshair) {
        (Some(r), _) => (r.position, r.projectile),
        (None, Some(aim)) => (aim, place_type),
        (None, None) => return Ok(()),
    };

    // 2. Turn.
    let heading = heading_of(target - center);
    let max_step = turret.max_theta_speed
        + TURN_RATE_UPGRADE_BONUS * upgrades.level(UpgradeKind::TurnRate) as f64;
    let step = turn_toward(entity.theta, heading, max_step);
    turret.theta_speed = step.speed;
    entity.prev_theta = entity.theta;
    entity.theta = step.theta;

    let shooting = is_action_queued(entity, ActionKind::Shoot);
    if shooting || !step.ready {
        restore(world, id, request)?;
        return Ok(());
    }

    // 3. Funds and destination.
    let stats = projectile_stats(projectile);
    if !world.can_afford(stats.cost) {
        debug!(%id, ?projectile, cost = stats.cost, money = world.money, "cannot afford shot");
        if let Some(turret) = world.entity_mut(id)?.turret.as_mut() {
            turret.target_queue.clear();
        }
        restore(world, id, request)?;
        world.place_type = ProjectileKind::Bullet;
        return Ok(());
    }
    if stats.occupancy_sensitive && destination_occupied(world, target) {
        debug!(%id, ?target, "destination occupied");
        restore(world, id, request)?;
        return Ok(());
    }

    // 4. Fire.
    world.debit(stats.cost)?;
    let kind = world.entity(id)?.kind;
    let mut action = make_action(
        kind,
        ActionKind::Shoot,
        ActionPayload::Shoot {
            theta: heading,
            projectile,
            target_pos: request.map(|r| r.position),
        },
    );
    if request.is_some() {
        shorten(&mut action, QUEUED_SHOT_SPEEDUP);
    } else if projectile == ProjectileKind::Bullet {
        shorten(&mut action, 1.0 + upgrades.level(UpgradeKind::FireRate) as f64);
    }
    queue_action(world, id, action)
}

fn restore(world: &mut World, id: EntityId, request: Option<TargetRequest>) -> Result<(), SimError> {
    let Some(request) = request else {
        return Ok(());
    };
    if let Some(turret) = world.entity_mut(id)?.turret.as_mut() {
        turret.target_queue.push_front(request);
    }
    Ok(())
}

/// A Stone lob needs an empty destination cell.
fn destination_occupied(world: &World, target: DVec2) -> bool {
    world
        .entities_at(cell_of(target))
        .any(|e| e.kind == EntityKind::Stone)
}
