//! The world: an id-indexed entity arena plus shared game state.
//!
//! Every mutation that changes an entity's kind, position or existence goes
//! through the methods here so that the per-type id sets and the spatial
//! grid stay consistent.

use std::collections::{BTreeSet, HashMap};

use glam::{DVec2, IVec2};
use tracing::trace;

use bastion_core::components::{Entity, KeysDown, Ticker, Upgrades};
use bastion_core::config::SimConfig;
use bastion_core::enums::*;
use bastion_core::events::{PheromoneSource, PheromoneUpdate};
use bastion_core::types::{cell_of, Cell, EntityId};

use crate::actions;
use crate::entity::EntityAllocator;
use crate::error::SimError;
use crate::grid::{footprint, SpatialGrid};

pub struct World {
    allocator: EntityAllocator,
    entities: Vec<Option<Entity>>,
    grid: SpatialGrid,

    // Per-type id sets, ordered so iteration is deterministic.
    pub actors: BTreeSet<EntityId>,
    pub agents: BTreeSet<EntityId>,
    pub towers: BTreeSet<EntityId>,
    pub ballistics: BTreeSet<EntityId>,
    pub explosives: BTreeSet<EntityId>,
    pub emitters: BTreeSet<EntityId>,
    pub farms: BTreeSet<EntityId>,
    pub bases: BTreeSet<EntityId>,

    /// Tick counter (1 on the first tick).
    pub time: u64,
    /// Real elapsed time handed to the current tick (ms).
    pub time_since_last_tick: f64,
    pub total_game_time: f64,

    pub money: u32,
    pub crosshair: Option<DVec2>,
    /// Projectile type used for crosshair shots.
    pub place_type: ProjectileKind,
    pub upgrades: Upgrades,
    pub gravity: f64,

    pub keys_down: KeysDown,
    pub controlled: Option<EntityId>,
    pub focused: Option<EntityId>,
    pub view_pos: DVec2,
    pub view_width: f64,
    pub view_height: f64,
    pub camera_mode: CameraMode,

    pub ticker: Option<Ticker>,
    pub mini_ticker: Option<Ticker>,
    pub shown_projectile_hint: bool,

    /// Tiles whose neighbour mask must be recomputed.
    pub stale_tiles: Vec<EntityId>,
    pub flood_fill_sources: Vec<PheromoneSource>,
    pub reverse_flood_fill_sources: Vec<PheromoneSource>,
    pheromones: HashMap<(PheromoneKind, Cell), f64>,

    pub game_over: bool,
}

impl World {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            allocator: EntityAllocator::new(),
            entities: Vec::new(),
            grid: SpatialGrid::new(config.grid_width, config.grid_height),
            actors: BTreeSet::new(),
            agents: BTreeSet::new(),
            towers: BTreeSet::new(),
            ballistics: BTreeSet::new(),
            explosives: BTreeSet::new(),
            emitters: BTreeSet::new(),
            farms: BTreeSet::new(),
            bases: BTreeSet::new(),
            time: 0,
            time_since_last_tick: 0.0,
            total_game_time: 0.0,
            money: config.starting_money,
            crosshair: None,
            place_type: ProjectileKind::default(),
            upgrades: Upgrades::default(),
            gravity: config.gravity,
            keys_down: KeysDown::default(),
            controlled: None,
            focused: None,
            view_pos: DVec2::ZERO,
            view_width: config.view_width,
            view_height: config.view_height,
            camera_mode: config.camera_mode,
            ticker: None,
            mini_ticker: None,
            shown_projectile_hint: false,
            stale_tiles: Vec::new(),
            flood_fill_sources: Vec::new(),
            reverse_flood_fill_sources: Vec::new(),
            pheromones: HashMap::new(),
            game_over: false,
        }
    }

    // --- Lookup ---

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities
            .get(id.index as usize)?
            .as_ref()
            .filter(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities
            .get_mut(id.index as usize)?
            .as_mut()
            .filter(|e| e.id == id)
    }

    pub fn entity(&self, id: EntityId) -> Result<&Entity, SimError> {
        self.get(id).ok_or(SimError::StaleEntity(id))
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, SimError> {
        self.get_mut(id).ok_or(SimError::StaleEntity(id))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().flatten()
    }

    pub fn entity_count(&self) -> usize {
        self.iter().count()
    }

    pub fn grid_width(&self) -> u32 {
        self.grid.width()
    }

    pub fn grid_height(&self) -> u32 {
        self.grid.height()
    }

    /// Ids whose footprint covers a cell.
    pub fn lookup(&self, cell: Cell) -> &[EntityId] {
        self.grid.lookup(cell)
    }

    pub fn entities_at(&self, cell: Cell) -> impl Iterator<Item = &Entity> {
        self.lookup(cell).iter().filter_map(|&id| self.get(id))
    }

    pub fn contains_footprint(&self, position: DVec2, width: f64, height: f64) -> bool {
        self.grid.contains_footprint(position, width, height)
    }

    pub fn contains_cell(&self, cell: Cell) -> bool {
        self.grid.contains_cell(cell)
    }

    // --- Entity mutation ---

    /// Insert an entity, assigning its id.
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        let id = self.allocator.allocate();
        entity.id = id;
        let idx = id.index as usize;
        if self.entities.len() <= idx {
            self.entities.resize_with(idx + 1, || None);
        }

        self.grid
            .insert(id, entity.position, entity.width, entity.height);
        if entity.kind.is_tiled() {
            self.mark_stale_around(id, entity.position, entity.width, entity.height);
        }
        if let Some(emitter) = entity.emitter {
            if emitter.quantity > 0.0 {
                self.flood_fill_sources.push(PheromoneSource {
                    id,
                    pheromone: emitter.pheromone,
                    position: cell_of(entity.center()),
                    quantity: emitter.quantity,
                });
            }
        }
        self.entities[idx] = Some(entity);
        self.register(id);
        trace!(%id, "spawned");
        id
    }

    /// Remove an entity from the arena, the type sets and the grid.
    pub fn remove(&mut self, id: EntityId) -> Result<Entity, SimError> {
        self.entity(id)?;
        self.unregister(id);
        let entity = self.entities[id.index as usize]
            .take()
            .ok_or(SimError::StaleEntity(id))?;
        self.allocator.deallocate(id);

        self.grid
            .remove(id, entity.position, entity.width, entity.height);
        if entity.kind.is_tiled() {
            self.mark_stale_around(id, entity.position, entity.width, entity.height);
        }
        if let Some(emitter) = entity.emitter {
            self.reverse_flood_fill_sources.push(PheromoneSource {
                id,
                pheromone: emitter.pheromone,
                position: cell_of(entity.center()),
                quantity: 0.0,
            });
        }
        if self.controlled == Some(id) {
            self.controlled = None;
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        trace!(%id, kind = ?entity.kind, "removed");
        Ok(entity)
    }

    /// Move an entity's top-left corner, recording the previous position.
    pub fn move_entity(&mut self, id: EntityId, position: DVec2) -> Result<(), SimError> {
        let entity = self.entity(id)?;
        let (old, width, height, tiled) =
            (entity.position, entity.width, entity.height, entity.kind.is_tiled());

        self.grid.remove(id, old, width, height);
        self.grid.insert(id, position, width, height);
        if tiled {
            self.mark_stale_around(id, old, width, height);
            self.mark_stale_around(id, position, width, height);
        }

        let entity = self.entity_mut(id)?;
        entity.prev_position = old;
        entity.position = position;
        Ok(())
    }

    /// Change an entity's type tag. `adapt` adjusts components for the new
    /// kind; type sets and grid footprint are rebuilt afterwards.
    pub fn retype(
        &mut self,
        id: EntityId,
        kind: EntityKind,
        adapt: impl FnOnce(&mut Entity),
    ) -> Result<(), SimError> {
        self.unregister(id);
        let entity = self.entity_mut(id)?;
        let (old_pos, old_w, old_h) = (entity.position, entity.width, entity.height);
        entity.kind = kind;
        adapt(entity);
        let (pos, w, h, tiled) = (entity.position, entity.width, entity.height, kind.is_tiled());

        self.grid.remove(id, old_pos, old_w, old_h);
        self.grid.insert(id, pos, w, h);
        if tiled {
            self.mark_stale_around(id, pos, w, h);
        }
        self.register(id);
        Ok(())
    }

    /// Apply damage; an entity reduced to zero hp gets one DIE action.
    pub fn deal_damage(&mut self, id: EntityId, amount: f64) -> Result<(), SimError> {
        let entity = self.entity_mut(id)?;
        entity.hp -= amount;
        if entity.hp <= 0.0 && !actions::is_action_queued(entity, ActionKind::Die) {
            let die = actions::make_action(entity.kind, ActionKind::Die, Default::default());
            actions::queue_action(self, id, die)?;
        }
        Ok(())
    }

    /// Add an id to the type sets its components call for.
    pub(crate) fn register(&mut self, id: EntityId) {
        let Some(entity) = self.get(id) else {
            return;
        };
        let (actor, agent, tower, ballistic, explosive, emitter, farm, base) = (
            !entity.actions.is_empty(),
            entity.agent.is_some(),
            entity.turret.is_some(),
            entity.ballistic.is_some(),
            entity.explosive.is_some(),
            entity.emitter.is_some(),
            entity.rotor.is_some(),
            entity.kind == EntityKind::Base,
        );
        if actor {
            self.actors.insert(id);
        }
        if agent {
            self.agents.insert(id);
        }
        if tower {
            self.towers.insert(id);
        }
        if ballistic {
            self.ballistics.insert(id);
        }
        if explosive {
            self.explosives.insert(id);
        }
        if emitter {
            self.emitters.insert(id);
        }
        if farm {
            self.farms.insert(id);
        }
        if base {
            self.bases.insert(id);
        }
    }

    fn unregister(&mut self, id: EntityId) {
        for set in [
            &mut self.actors,
            &mut self.agents,
            &mut self.towers,
            &mut self.ballistics,
            &mut self.explosives,
            &mut self.emitters,
            &mut self.farms,
            &mut self.bases,
        ] {
            set.remove(&id);
        }
    }

    // --- Collisions ---

    /// Distinct entities overlapping `id` whose kind is in `blocking`,
    /// excluding `id` itself and entities with the same owner.
    pub fn collisions(&self, id: EntityId, blocking: &[EntityKind]) -> Vec<EntityId> {
        let Some(entity) = self.get(id) else {
            return Vec::new();
        };
        let mut hits: Vec<EntityId> = Vec::new();
        for cell in footprint(entity.position, entity.width, entity.height) {
            for other in self.entities_at(cell) {
                if other.id == id || !blocking.contains(&other.kind) {
                    continue;
                }
                if entity.owner.is_some() && other.owner == entity.owner {
                    continue;
                }
                if !hits.contains(&other.id) {
                    hits.push(other.id);
                }
            }
        }
        hits
    }

    // --- Resources ---

    pub fn can_afford(&self, cost: u32) -> bool {
        self.money >= cost
    }

    pub fn debit(&mut self, cost: u32) -> Result<(), SimError> {
        if !self.can_afford(cost) {
            return Err(SimError::InsufficientFunds {
                cost,
                balance: self.money,
            });
        }
        self.money -= cost;
        Ok(())
    }

    // --- Pheromones ---

    /// Set an emitter's output and queue the matching diffusion request.
    pub fn set_emitter_quantity(&mut self, id: EntityId, quantity: f64) -> Result<(), SimError> {
        let entity = self.entity_mut(id)?;
        let center = cell_of(entity.center());
        let Some(emitter) = entity.emitter.as_mut() else {
            return Ok(());
        };
        emitter.quantity = quantity;
        let source = PheromoneSource {
            id,
            pheromone: emitter.pheromone,
            position: center,
            quantity,
        };
        if quantity > 0.0 {
            self.flood_fill_sources.push(source);
        } else {
            self.reverse_flood_fill_sources.push(source);
        }
        Ok(())
    }

    pub fn pheromone_at(&self, pheromone: PheromoneKind, cell: Cell) -> f64 {
        self.pheromones
            .get(&(pheromone, cell))
            .copied()
            .unwrap_or(0.0)
    }

    /// Apply a result produced by the diffusion engine.
    pub fn apply_pheromone_update(&mut self, update: &PheromoneUpdate) {
        for &(cell, value) in &update.cells {
            if value <= 0.0 {
                self.pheromones.remove(&(update.pheromone, cell));
            } else {
                self.pheromones.insert((update.pheromone, cell), value);
            }
        }
    }

    // --- Tiles ---

    /// Same-kind neighbour mask: up=1, right=2, down=4, left=8.
    pub fn neighbor_mask(&self, id: EntityId) -> Option<u8> {
        let entity = self.get(id)?;
        let cell = cell_of(entity.position);
        let mut mask = 0u8;
        for (bit, offset) in [
            (1u8, IVec2::new(0, 1)),
            (2, IVec2::new(1, 0)),
            (4, IVec2::new(0, -1)),
            (8, IVec2::new(-1, 0)),
        ] {
            if self
                .entities_at(cell + offset)
                .any(|other| other.kind == entity.kind && other.id != id)
            {
                mask |= bit;
            }
        }
        Some(mask)
    }

    fn mark_stale_around(&mut self, id: EntityId, position: DVec2, width: f64, height: f64) {
        self.stale_tiles.push(id);
        let cell = cell_of(position);
        let (w, h) = ((width.ceil() as i32).max(1), (height.ceil() as i32).max(1));
        for offset in [
            IVec2::new(0, h),
            IVec2::new(w, 0),
            IVec2::new(0, -1),
            IVec2::new(-1, 0),
        ] {
            let neighbors: Vec<EntityId> = self
                .entities_at(cell + offset)
                .filter(|e| e.kind.is_tiled())
                .map(|e| e.id)
                .collect();
            self.stale_tiles.extend(neighbors);
        }
    }
}
