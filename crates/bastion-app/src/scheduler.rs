//! Tick scheduler: runs the simulation engine on its own thread at a fixed
//! interval, handing each tick the real time elapsed since the previous one.
//!
//! The engine moves into the loop thread on `start` and comes back on
//! `stop`, so a stopped scheduler can be restarted on the same world.
//! Commands arrive via `mpsc` channel and are applied at the next tick
//! boundary. The latest snapshot is stored in shared state for polling.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, trace, warn};

use bastion_core::commands::PlayerCommand;
use bastion_core::state::WorldSnapshot;
use bastion_sim::SimulationEngine;

use crate::state::{shared_snapshot, LoopCommand, SharedSnapshot};

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("failed to spawn thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("loop thread panicked")]
    Panicked,
}

/// Measures real time between ticks.
#[derive(Debug, Default)]
pub struct TickClock {
    prev: Option<Instant>,
}

impl TickClock {
    /// Milliseconds since the previous call; 0 on the first.
    pub fn elapsed_ms(&mut self, now: Instant) -> f64 {
        let elapsed = self
            .prev
            .map_or(0.0, |prev| now.saturating_duration_since(prev).as_secs_f64() * 1000.0);
        self.prev = Some(now);
        elapsed
    }
}

/// What the loop thread owns while running, returned on exit.
struct LoopParts {
    engine: SimulationEngine,
    commands: mpsc::Receiver<LoopCommand>,
}

pub struct TickScheduler {
    interval: Duration,
    parts: Option<LoopParts>,
    handle: Option<JoinHandle<LoopParts>>,
    command_tx: mpsc::Sender<LoopCommand>,
    latest: SharedSnapshot,
}

impl TickScheduler {
    pub fn new(engine: SimulationEngine, interval: Duration) -> Self {
        let (command_tx, commands) = mpsc::channel();
        Self {
            interval,
            parts: Some(LoopParts { engine, commands }),
            handle: None,
            command_tx,
            latest: shared_snapshot(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Sender for commands and diffusion results. Valid before `start`.
    pub fn sender(&self) -> mpsc::Sender<LoopCommand> {
        self.command_tx.clone()
    }

    /// Queue a player command for the next tick boundary.
    pub fn send(&self, command: PlayerCommand) {
        if let Err(err) = self.command_tx.send(LoopCommand::Player(command)) {
            warn!(command = ?err.0, "tick loop gone; command dropped");
        }
    }

    pub fn latest_snapshot(&self) -> Option<WorldSnapshot> {
        self.latest.lock().ok().and_then(|lock| lock.clone())
    }

    /// Spawn the loop thread. No-op if already running.
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        let Some(parts) = self.parts.take() else {
            return Ok(());
        };
        let latest = self.latest.clone();
        let interval = self.interval;
        let handle = std::thread::Builder::new()
            .name("bastion-tick".into())
            .spawn(move || run_loop(parts, &latest, interval))?;
        self.handle = Some(handle);
        info!(interval_ms = interval.as_millis() as u64, "scheduler started");
        Ok(())
    }

    /// Stop the loop and wait for it. The tick in flight completes first.
    /// No-op if not running.
    pub fn stop(&mut self) -> Result<(), SchedulerError> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        if self.command_tx.send(LoopCommand::Shutdown).is_err() {
            warn!("tick loop gone before shutdown");
        }
        let parts = handle.join().map_err(|_| SchedulerError::Panicked)?;
        info!(tick = parts.engine.world().time, "scheduler stopped");
        self.parts = Some(parts);
        Ok(())
    }

    /// The engine, while stopped.
    pub fn engine(&self) -> Option<&SimulationEngine> {
        self.parts.as_ref().map(|parts| &parts.engine)
    }

    /// Stop and hand back the engine.
    pub fn into_engine(mut self) -> Result<SimulationEngine, SchedulerError> {
        self.stop()?;
        self.parts
            .take()
            .map(|parts| parts.engine)
            .ok_or(SchedulerError::Panicked)
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            warn!(%err, "scheduler stop failed on drop");
        }
    }
}

/// The tick loop. Runs until Shutdown.
fn run_loop(mut parts: LoopParts, latest: &SharedSnapshot, interval: Duration) -> LoopParts {
    let mut clock = TickClock::default();
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain pending commands
        loop {
            match parts.commands.try_recv() {
                Ok(LoopCommand::Player(cmd)) => parts.engine.queue_command(cmd),
                Ok(LoopCommand::Pheromones(update)) => {
                    parts.engine.apply_pheromone_update(&update)
                }
                Ok(LoopCommand::Shutdown) => return parts,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return parts,
            }
        }

        // 2. Advance one tick by the real time since the last one
        let elapsed = clock.elapsed_ms(Instant::now());
        let snapshot = parts.engine.tick(elapsed);
        trace!(tick = snapshot.time.tick, elapsed, "tick");

        // 3. Publish
        if let Ok(mut lock) = latest.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until the next deadline
        next_tick_time += interval;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > interval * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}
