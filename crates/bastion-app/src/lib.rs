//! Runtime for bastion: the real-time tick scheduler, a stand-in diffusion
//! engine, and the `bastion` binary built on them.

pub mod diffusion_worker;
pub mod scheduler;
pub mod state;

pub use bastion_core as core;
pub use scheduler::{SchedulerError, TickClock, TickScheduler};
