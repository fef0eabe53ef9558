//! Decision hook invoked when an agent runs out of actions.

use glam::{DVec2, IVec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use bastion_core::components::ActionPayload;
use bastion_core::enums::{ActionKind, EntityKind, PheromoneKind};
use bastion_core::types::{cell_of, heading_of, EntityId};

use crate::actions::{make_action, queue_action};
use crate::grid::footprint;
use crate::world::World;

/// Chooses what an idle agent does next.
///
/// Called synchronously with the agent's queue empty. May push zero or more
/// actions; pushing none leaves the agent idle until the next tick.
pub trait DecisionHook: Send {
    fn decide(&mut self, world: &mut World, id: EntityId);
}

impl<F> DecisionHook for F
where
    F: FnMut(&mut World, EntityId) + Send,
{
    fn decide(&mut self, world: &mut World, id: EntityId) {
        self(world, id)
    }
}

const STEPS: [IVec2; 4] = [
    IVec2::new(0, 1),
    IVec2::new(1, 0),
    IVec2::new(0, -1),
    IVec2::new(-1, 0),
];

/// Default hook: step to a free neighbouring cell. Monsters climb the
/// colony pheromone gradient when one is present; otherwise the step is
/// picked at random.
pub struct WanderDecision {
    rng: ChaCha8Rng,
}

impl WanderDecision {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl DecisionHook for WanderDecision {
    fn decide(&mut self, world: &mut World, id: EntityId) {
        let Some(entity) = world.get(id) else {
            return;
        };

        let candidates: Vec<IVec2> = STEPS
            .into_iter()
            .filter(|step| {
                let next = entity.position + step.as_dvec2();
                world.contains_footprint(next, entity.width, entity.height)
                    && footprint(next, entity.width, entity.height).all(|cell| {
                        world
                            .entities_at(cell)
                            .all(|other| other.id == id || other.kind == EntityKind::Ballistic)
                    })
            })
            .collect();
        if candidates.is_empty() {
            return;
        }

        let scent = |step: &IVec2| {
            world.pheromone_at(PheromoneKind::Colony, cell_of(entity.center()) + *step)
        };
        let uphill = (entity.kind == EntityKind::Monster)
            .then(|| {
                candidates
                    .iter()
                    .copied()
                    .filter(|step| scent(step) > 0.0)
                    .max_by(|a, b| scent(a).total_cmp(&scent(b)))
            })
            .flatten();
        let step = uphill.unwrap_or_else(|| candidates[self.rng.gen_range(0..candidates.len())]);

        let next_pos: DVec2 = entity.position + step.as_dvec2();
        let theta = heading_of(step.as_dvec2());
        let action = if (theta - entity.theta).abs() > f64::EPSILON {
            make_action(
                entity.kind,
                ActionKind::MoveTurn,
                ActionPayload::MoveTurn {
                    next_pos,
                    next_theta: theta,
                },
            )
        } else {
            make_action(entity.kind, ActionKind::Move, ActionPayload::Move { next_pos })
        };

        if let Err(err) = queue_action(world, id, action) {
            warn!(%id, %err, "decision dropped");
        }
    }
}
