//! Recoverable simulation errors.
//!
//! None of these escape a tick: systems log them and move on.

use glam::DVec2;
use thiserror::Error;

use bastion_core::types::EntityId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("entity {0} no longer exists")]
    StaleEntity(EntityId),
    #[error("cannot afford {cost} with balance {balance}")]
    InsufficientFunds { cost: u32, balance: u32 },
    #[error("position {position} lies outside the grid")]
    OutOfBounds { position: DVec2 },
}
