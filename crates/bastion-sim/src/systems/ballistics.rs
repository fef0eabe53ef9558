//! Projectile flight, collision and damage.
//!
//! Flight is a closed-form function of accumulated age, so variable tick
//! lengths never introduce drift.

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{trace, warn};

use bastion_core::components::ActionPayload;
use bastion_core::constants::*;
use bastion_core::enums::{ActionKind, EntityKind};
use bastion_core::types::{heading_of, EntityId};

use crate::actions::{is_action_queued, make_action, queue_action};
use crate::error::SimError;
use crate::systems::tickers::ticker;
use crate::world::World;

/// Position at rescaled age `a`:
/// `P + v·a·(cos θ, sin θ) − (0, ½·g·a²)`.
pub fn trajectory_position(
    initial: DVec2,
    velocity: f64,
    theta: f64,
    gravity: f64,
    a: f64,
) -> DVec2 {
    initial + velocity * a * DVec2::new(theta.cos(), theta.sin())
        - DVec2::new(0.0, 0.5 * gravity * a * a)
}

pub fn run(world: &mut World, rng: &mut ChaCha8Rng) {
    let ids: Vec<EntityId> = world.ballistics.iter().copied().collect();
    for id in ids {
        if let Err(err) = update(world, rng, id) {
            warn!(%id, %err, "ballistic skipped");
        }
    }
}

fn update(world: &mut World, rng: &mut ChaCha8Rng, id: EntityId) -> Result<(), SimError> {
    let dt = world.time_since_last_tick;
    let crosshair = world.crosshair;

    let entity = world.entity_mut(id)?;
    if is_action_queued(entity, ActionKind::Die) {
        return Ok(());
    }
    let Some(state) = entity.ballistic.as_mut() else {
        return Ok(());
    };
    state.age += dt;
    entity.age = state.age;

    let in_range = state.warhead.is_some_and(|w| {
        w.target
            .or(crosshair)
            .is_some_and(|t| state.position.distance(t) <= WARHEAD_TRIGGER_RANGE)
    });
    let miss_rate = state.miss_rate;
    let blocking = state.blocking.clone();

    // Distinct ids, so each victim is hit at most once this tick.
    let victims = world.collisions(id, &blocking);

    if !victims.is_empty() || in_range {
        let missed = miss_rate.is_some_and(|rate| rng.gen::<f64>() < rate);
        if missed {
            trace!(%id, "missed");
        } else {
            let survives = strike(world, id, &victims)?;
            if in_range {
                if let Some(state) = world.entity_mut(id)?.ballistic.as_mut() {
                    state.reached_target = true;
                }
            }
            if in_range || !survives {
                return kill(world, id);
            }
        }
    }

    advance(world, id)
}

/// Damage each victim. Returns whether the projectile survives.
fn strike(world: &mut World, id: EntityId, victims: &[EntityId]) -> Result<bool, SimError> {
    let Some(state) = world.entity(id)?.ballistic.as_ref() else {
        return Ok(false);
    };
    let (damage, piercing) = (state.damage, state.piercing);

    for &victim in victims {
        let Some(target) = world.get(victim) else {
            continue;
        };
        let (victim_hp, victim_kind) = (target.hp, target.kind);

        if piercing && victim_kind.is_collectable() {
            world.entity_mut(id)?.hp -= victim_hp / PIERCE_HP_DIVISOR;
        }

        world.deal_damage(victim, damage)?;
        if victim_kind == EntityKind::Base {
            world.mini_ticker = Some(ticker(BASE_HIT_MESSAGE));
        }
        trace!(%id, %victim, damage, "hit");
    }

    Ok(piercing && world.entity(id)?.hp > 0.0)
}

fn advance(world: &mut World, id: EntityId) -> Result<(), SimError> {
    let entity = world.entity_mut(id)?;
    let Some(state) = entity.ballistic.as_mut() else {
        return Ok(());
    };
    let a = state.age / BALLISTIC_TIME_SCALE;
    let next = trajectory_position(
        state.initial_position,
        state.velocity,
        state.initial_theta,
        state.gravity,
        a,
    );
    let prev = std::mem::replace(&mut state.position, next);
    if next != prev {
        entity.prev_theta = entity.theta;
        entity.theta = heading_of(next - prev);
    }

    let (width, height) = (entity.width, entity.height);
    if !world.contains_footprint(next, width, height) {
        trace!(%id, ?next, "left the grid");
        return kill(world, id);
    }
    let rounded = next.round();
    if rounded != world.entity(id)?.position {
        world.move_entity(id, rounded)?;
    }
    Ok(())
}

fn kill(world: &mut World, id: EntityId) -> Result<(), SimError> {
    let entity = world.entity(id)?;
    if is_action_queued(entity, ActionKind::Die) {
        return Ok(());
    }
    let die = make_action(entity.kind, ActionKind::Die, ActionPayload::None);
    queue_action(world, id, die)
}
