//! Grid to world coordinate conversion
//!
//! World space is in metres with the origin at the centre of the map; one
//! grid cell is a tenth of a metre. The midpoint of a run is kept as an
//! integer numerator in twentieths of a metre and divided once, so every
//! result is the correctly rounded value of the exact decimal answer.

use serde::Serialize;

use crate::grid::{Grid, Point};

/// Axis-aligned box in world space
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WorldBox {
    /// Centre of the box
    pub position: [f64; 2],
    /// Extent along x and y
    pub size: [f64; 2],
}

/// Conversion for a grid of fixed dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldTransform {
    width: usize,
    height: usize,
}

impl WorldTransform {
    /// Grid cells per world unit
    pub const SCALE: i64 = 10;

    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.width(), grid.height())
    }

    /// Box covering every cell from `start` to `end`, inclusive
    pub fn bounds_to_world(&self, start: Point, end: Point) -> WorldBox {
        let (x, w) = Self::axis(start.x, end.x, self.width);
        let (y, h) = Self::axis(start.y, end.y, self.height);
        WorldBox {
            position: [x, y],
            size: [w, h],
        }
    }

    /// World position of the centre of cell `p`
    pub fn point_to_world(&self, p: Point) -> [f64; 2] {
        self.bounds_to_world(p, p).position
    }

    fn axis(a: usize, b: usize, cells: usize) -> (f64, f64) {
        let (lo, hi) = (a.min(b) as i64, a.max(b) as i64);
        // (lo + hi) / 2 / SCALE - (cells - 1) / 2 / SCALE
        let centre = (lo + hi - (cells as i64 - 1)) as f64 / (2 * Self::SCALE) as f64;
        let size = (hi - lo + 1) as f64 / Self::SCALE as f64;
        (centre, size)
    }
}
