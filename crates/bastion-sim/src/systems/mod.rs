//! Tick systems, listed in the order the engine runs them.
//!
//! Systems are plain functions over `&mut World`. They own no state; all
//! state lives in the world or is passed in by the engine.

pub mod controlled;
pub mod actors;
pub mod agents;
pub mod tiles;
pub mod camera;
pub mod tickers;
pub mod emitters;
pub mod towers;
pub mod farms;
pub mod bases;
pub mod ballistics;
pub mod explosives;
pub mod pheromones;
pub mod snapshot;
