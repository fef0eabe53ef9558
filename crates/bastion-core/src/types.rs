//! Fundamental geometric and simulation types.

use std::f64::consts::TAU;

use glam::{DVec2, IVec2};
use serde::{Deserialize, Serialize};

/// Generational entity handle.
///
/// The index is reused after the entity is removed; the generation is bumped
/// so that a handle held past removal never resolves to the new occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId {
    pub index: u32,
    pub generation: u32,
}

impl EntityId {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{}g{}", self.index, self.generation)
    }
}

/// Owning player. Projectiles never collide with their owner's entities.
pub type PlayerId = u32;

/// Grid cell coordinate.
pub type Cell = IVec2;

/// Simulation time as reported to the renderer.
///
/// `tick` counts ticks run; `total_ms` accumulates the real elapsed time
/// handed to each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    pub tick: u64,
    pub total_ms: f64,
}

/// Wrap an angle into `[0, 2π)`.
pub fn normalize_angle(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Heading of a vector in `[0, 2π)`, measured from +x toward +y.
pub fn heading_of(v: DVec2) -> f64 {
    normalize_angle(v.y.atan2(v.x))
}

/// Cell containing a world-space point (positions are cell-aligned, so
/// rounding picks the nearest cell origin).
pub fn cell_of(pos: DVec2) -> Cell {
    let r = pos.round();
    IVec2::new(r.x as i32, r.y as i32)
}

/// Round both components to two decimal places.
pub fn round_hundredths(v: DVec2) -> DVec2 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_wraps_negative_and_large_angles() {
        assert!((normalize_angle(-0.1) - (TAU - 0.1)).abs() < 1e-12);
        assert!((normalize_angle(TAU + 0.25) - 0.25).abs() < 1e-12);
        assert_eq!(normalize_angle(TAU), 0.0);
        assert_eq!(normalize_angle(-1e-18), 0.0);
    }

    #[test]
    fn heading_points_from_x_axis() {
        assert!((heading_of(DVec2::new(1.0, 0.0))).abs() < 1e-12);
        assert!((heading_of(DVec2::new(0.0, 1.0)) - TAU / 4.0).abs() < 1e-12);
        assert!((heading_of(DVec2::new(0.0, -1.0)) - 3.0 * TAU / 4.0).abs() < 1e-12);
    }

    #[test]
    fn hundredths_rounding() {
        let v = round_hundredths(DVec2::new(1.23456, -7.891));
        assert_eq!(v, DVec2::new(1.23, -7.89));
    }
}
