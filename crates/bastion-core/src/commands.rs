//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::ProjectileKind;
use crate::types::EntityId;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Aiming ---
    /// Move the shared crosshair (grid coordinates).
    SetCrosshair { x: f64, y: f64 },
    /// Remove the crosshair; towers stop tracking it.
    ClearCrosshair,
    /// Queue a shot at a cell on the first base's turret.
    EnqueueTarget {
        x: f64,
        y: f64,
        projectile: ProjectileKind,
    },
    /// Select the projectile type used for crosshair shots.
    SetPlaceType { projectile: ProjectileKind },

    // --- Control ---
    /// Replace the held movement keys.
    SetKeys {
        up: bool,
        down: bool,
        left: bool,
        right: bool,
    },
    /// Follow an entity with the camera.
    Focus { id: Option<EntityId> },
    /// Drive an entity with the movement keys.
    Control { id: Option<EntityId> },
}
