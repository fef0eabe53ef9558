//! Outbound link to the pheromone diffusion engine.
//!
//! Sending never blocks and never waits for a reply. Results come back as
//! `PheromoneUpdate`s applied between ticks.

use std::sync::mpsc::Sender;

use tracing::{trace, warn};

use bastion_core::events::DiffusionMessage;

#[derive(Default)]
pub struct DiffusionLink {
    sender: Option<Sender<DiffusionMessage>>,
}

impl DiffusionLink {
    pub fn new(sender: Sender<DiffusionMessage>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.sender.is_some()
    }

    /// Fire and forget. A closed channel drops the message and detaches.
    pub fn send(&mut self, message: DiffusionMessage) {
        let Some(sender) = &self.sender else {
            trace!("no diffusion engine attached");
            return;
        };
        if let Err(err) = sender.send(message) {
            warn!(dropped = ?err.0, "diffusion engine disconnected");
            self.sender = None;
        }
    }
}
