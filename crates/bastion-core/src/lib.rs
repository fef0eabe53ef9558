//! Core types and definitions for the bastion simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! the entity record and its components, stat tables, commands, diffusion
//! messages, snapshots, and configuration. It has no runtime behavior.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod stats;
pub mod types;

#[cfg(test)]
mod tests;
