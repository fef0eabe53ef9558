//! Headless simulation for bastion.
//!
//! Owns the entity arena, runs the tick systems in a fixed order, and
//! produces `WorldSnapshot`s for a renderer. Knows nothing about threads or
//! wall clocks: callers hand each tick its elapsed real time.

pub mod actions;
pub mod decision;
pub mod diffusion;
pub mod effects;
pub mod engine;
pub mod entity;
pub mod error;
pub mod factory;
pub mod grid;
pub mod systems;
pub mod world;

pub use bastion_core as core;
pub use decision::{DecisionHook, WanderDecision};
pub use engine::SimulationEngine;
pub use error::SimError;
pub use world::World;

#[cfg(test)]
mod tests;
