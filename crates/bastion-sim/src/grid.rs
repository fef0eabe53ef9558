//! Spatial index: grid cell -> ids of entities whose footprint covers it.

use std::collections::HashMap;

use glam::{DVec2, IVec2};

use bastion_core::types::{cell_of, Cell, EntityId};

pub struct SpatialGrid {
    width: u32,
    height: u32,
    cells: HashMap<Cell, Vec<EntityId>>,
}

impl SpatialGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: HashMap::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether a whole footprint lies inside the grid.
    pub fn contains_footprint(&self, position: DVec2, width: f64, height: f64) -> bool {
        position.x >= 0.0
            && position.y >= 0.0
            && position.x + width <= self.width as f64
            && position.y + height <= self.height as f64
    }

    pub fn contains_cell(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    pub fn insert(&mut self, id: EntityId, position: DVec2, width: f64, height: f64) {
        for cell in footprint(position, width, height) {
            let ids = self.cells.entry(cell).or_default();
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }

    pub fn remove(&mut self, id: EntityId, position: DVec2, width: f64, height: f64) {
        for cell in footprint(position, width, height) {
            if let Some(ids) = self.cells.get_mut(&cell) {
                ids.retain(|&other| other != id);
                if ids.is_empty() {
                    self.cells.remove(&cell);
                }
            }
        }
    }

    /// Ids occupying a cell.
    pub fn lookup(&self, cell: Cell) -> &[EntityId] {
        self.cells.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Cells covered by a footprint anchored at its top-left corner.
pub fn footprint(position: DVec2, width: f64, height: f64) -> impl Iterator<Item = Cell> {
    let origin = cell_of(position);
    let w = (width.ceil() as i32).max(1);
    let h = (height.ceil() as i32).max(1);
    (0..w).flat_map(move |dx| (0..h).map(move |dy| origin + IVec2::new(dx, dy)))
}
