//! Messages exchanged with the external pheromone diffusion engine.
//!
//! Requests are fire-and-forget: the simulation never waits for a reply
//! within the tick that produced them.

use glam::{DVec2, IVec2};
use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, PheromoneKind};
use crate::types::EntityId;

/// Grid extent sent on initialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    pub width: u32,
    pub height: u32,
}

/// Minimal entity description for the diffusion engine's obstacle map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: DVec2,
    pub width: f64,
    pub height: f64,
}

/// An emitter's configuration at initialisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmitterConfig {
    pub id: EntityId,
    pub pheromone: PheromoneKind,
    pub quantity: f64,
    pub position: DVec2,
}

/// A point source pushed into (or withdrawn from) the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PheromoneSource {
    pub id: EntityId,
    pub pheromone: PheromoneKind,
    pub position: IVec2,
    pub quantity: f64,
}

/// Requests sent to the diffusion engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiffusionMessage {
    Init {
        grid: GridDims,
        entities: Vec<EntitySummary>,
        emitters: Vec<EmitterConfig>,
    },
    DispersePheromones,
    FloodFill {
        sources: Vec<PheromoneSource>,
    },
    ReverseFloodFill {
        sources: Vec<PheromoneSource>,
    },
}

/// Result produced by the diffusion engine, applied on a later tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PheromoneUpdate {
    pub pheromone: PheromoneKind,
    pub cells: Vec<(IVec2, f64)>,
}
