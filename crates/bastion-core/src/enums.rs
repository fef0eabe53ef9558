//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Entity type tag. Selects the stat table and which optional components
/// an entity carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Player base: turret-bearing tower and pheromone emitter.
    Base,
    /// A projectile in flight.
    Ballistic,
    /// Hostile agent.
    Monster,
    /// Wandering agent that grants an upgrade when destroyed.
    Upgrade,
    Food,
    Dirt,
    Stone,
    /// Decorative rotor.
    Farm,
    /// Explosive with a fuse.
    Dynamite,
}

impl EntityKind {
    /// Collectable kinds wear down piercing projectiles.
    pub fn is_collectable(self) -> bool {
        matches!(self, EntityKind::Food | EntityKind::Dirt | EntityKind::Stone)
    }

    /// Tiled kinds carry a neighbour mask for sprite selection.
    pub fn is_tiled(self) -> bool {
        matches!(self, EntityKind::Food | EntityKind::Dirt | EntityKind::Stone)
    }
}

/// Timed behavior type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Move,
    MoveTurn,
    Turn,
    Shoot,
    Die,
}

impl ActionKind {
    /// Movement-class actions drive camera interpolation.
    pub fn is_motion(self) -> bool {
        matches!(self, ActionKind::Move | ActionKind::MoveTurn)
    }
}

/// Projectile type fired by towers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Free standard shot.
    #[default]
    Bullet,
    /// Survives hits while durability remains.
    Piercer,
    /// Guided warhead that detonates at its target.
    Missile,
    /// Guided warhead that settles into a Stone block at its target.
    Stone,
}

/// Global upgrade track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    FireRate,
    TurnRate,
    Damage,
}

/// Diffusible field type handled by the external diffusion engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PheromoneKind {
    #[default]
    Colony,
    Follow,
}

/// Camera behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraMode {
    /// View may leave the grid.
    #[default]
    FreeRoam,
    /// View clamped to the grid.
    Locked,
}
