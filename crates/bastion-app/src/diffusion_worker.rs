//! In-process stand-in for the pheromone diffusion engine.
//!
//! Consumes `DiffusionMessage`s on its own thread and answers with
//! `PheromoneUpdate`s through the tick loop's command channel, so results
//! land between ticks. The field is a linear falloff from each source,
//! decayed on every disperse request.

use std::collections::{BTreeMap, HashMap};
use std::sync::mpsc::{Receiver, Sender};
use std::thread::JoinHandle;

use glam::IVec2;
use tracing::{debug, info};

use bastion_core::enums::PheromoneKind;
use bastion_core::events::{DiffusionMessage, GridDims, PheromoneSource, PheromoneUpdate};
use bastion_core::types::{cell_of, EntityId};

use crate::scheduler::SchedulerError;
use crate::state::LoopCommand;

/// Field strength lost per cell of Manhattan distance.
pub const FALLOFF_PER_CELL: f64 = 10.0;
/// Multiplier applied to every cell on a disperse request.
pub const DISPERSE_DECAY: f64 = 0.9;
/// Values below this are dropped from the field.
const MIN_VALUE: f64 = 0.01;

#[derive(Debug, Default)]
pub struct DiffusionWorker {
    grid: Option<GridDims>,
    sources: BTreeMap<EntityId, PheromoneSource>,
    fields: HashMap<PheromoneKind, HashMap<IVec2, f64>>,
}

impl DiffusionWorker {
    /// Handle one request, returning the updates to publish.
    pub fn handle(&mut self, message: DiffusionMessage) -> Vec<PheromoneUpdate> {
        match message {
            DiffusionMessage::Init { grid, emitters, .. } => {
                self.grid = Some(grid);
                self.sources.clear();
                for emitter in emitters.into_iter().filter(|e| e.quantity > 0.0) {
                    self.sources.insert(
                        emitter.id,
                        PheromoneSource {
                            id: emitter.id,
                            pheromone: emitter.pheromone,
                            position: cell_of(emitter.position),
                            quantity: emitter.quantity,
                        },
                    );
                }
                self.rebuild_all()
            }
            DiffusionMessage::FloodFill { sources } => {
                let kinds = kinds_of(&sources);
                for source in sources {
                    self.sources.insert(source.id, source);
                }
                kinds.into_iter().map(|kind| self.rebuild(kind)).collect()
            }
            DiffusionMessage::ReverseFloodFill { sources } => {
                let kinds = kinds_of(&sources);
                for source in &sources {
                    self.sources.remove(&source.id);
                }
                kinds.into_iter().map(|kind| self.rebuild(kind)).collect()
            }
            DiffusionMessage::DispersePheromones => {
                let mut updates = Vec::new();
                for (&pheromone, field) in &mut self.fields {
                    let mut cells = Vec::with_capacity(field.len());
                    field.retain(|&cell, value| {
                        *value *= DISPERSE_DECAY;
                        if *value < MIN_VALUE {
                            cells.push((cell, 0.0));
                            false
                        } else {
                            cells.push((cell, *value));
                            true
                        }
                    });
                    if !cells.is_empty() {
                        updates.push(PheromoneUpdate { pheromone, cells });
                    }
                }
                updates
            }
        }
    }

    pub fn value_at(&self, pheromone: PheromoneKind, cell: IVec2) -> f64 {
        self.fields
            .get(&pheromone)
            .and_then(|field| field.get(&cell))
            .copied()
            .unwrap_or(0.0)
    }

    fn rebuild_all(&mut self) -> Vec<PheromoneUpdate> {
        let mut kinds: Vec<PheromoneKind> = self.fields.keys().copied().collect();
        kinds.extend(self.sources.values().map(|s| s.pheromone));
        kinds.sort();
        kinds.dedup();
        kinds.into_iter().map(|kind| self.rebuild(kind)).collect()
    }

    /// Recompute one field from its sources. The update zeroes any cell
    /// that dropped out.
    fn rebuild(&mut self, pheromone: PheromoneKind) -> PheromoneUpdate {
        let mut next: HashMap<IVec2, f64> = HashMap::new();
        for source in self.sources.values().filter(|s| s.pheromone == pheromone) {
            spread(source, self.grid, &mut next);
        }

        let previous = self.fields.remove(&pheromone).unwrap_or_default();
        let mut cells: Vec<(IVec2, f64)> = previous
            .keys()
            .filter(|cell| !next.contains_key(cell))
            .map(|&cell| (cell, 0.0))
            .collect();
        cells.extend(next.iter().map(|(&cell, &value)| (cell, value)));
        self.fields.insert(pheromone, next);
        PheromoneUpdate { pheromone, cells }
    }
}

fn kinds_of(sources: &[PheromoneSource]) -> Vec<PheromoneKind> {
    let mut kinds: Vec<PheromoneKind> = sources.iter().map(|s| s.pheromone).collect();
    kinds.sort();
    kinds.dedup();
    kinds
}

/// Add a diamond of linearly falling values around `source`.
fn spread(source: &PheromoneSource, grid: Option<GridDims>, field: &mut HashMap<IVec2, f64>) {
    let radius = (source.quantity / FALLOFF_PER_CELL).floor() as i32;
    for dx in -radius..=radius {
        let span = radius - dx.abs();
        for dy in -span..=span {
            let cell = source.position + IVec2::new(dx, dy);
            if let Some(grid) = grid {
                let inside = cell.x >= 0
                    && cell.y >= 0
                    && cell.x < grid.width as i32
                    && cell.y < grid.height as i32;
                if !inside {
                    continue;
                }
            }
            let value = source.quantity - FALLOFF_PER_CELL * (dx.abs() + dy.abs()) as f64;
            if value >= MIN_VALUE {
                *field.entry(cell).or_insert(0.0) += value;
            }
        }
    }
}

/// Run a worker until the request channel closes or the loop goes away.
pub fn spawn_diffusion_worker(
    requests: Receiver<DiffusionMessage>,
    replies: Sender<LoopCommand>,
) -> Result<JoinHandle<()>, SchedulerError> {
    let handle = std::thread::Builder::new()
        .name("bastion-diffusion".into())
        .spawn(move || {
            let mut worker = DiffusionWorker::default();
            while let Ok(message) = requests.recv() {
                debug!(?message, "diffusion request");
                for update in worker.handle(message) {
                    if replies.send(LoopCommand::Pheromones(update)).is_err() {
                        return;
                    }
                }
            }
            info!("diffusion worker finished");
        })?;
    Ok(handle)
}
