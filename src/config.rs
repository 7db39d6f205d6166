//! Generation parameters

use crate::error::GenerationError;
use crate::grid::Grid;
use crate::partition::{Axis, Rect, Split};
use crate::splitter::{child_rects, forced_axis, split_band};

/// Parameters of a generation run
///
/// The defaults describe the standard 25 m by 20 m arena: a 250×200 grid
/// split four times into 16 rooms, three bases and two robots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Number of times every leaf is split
    pub depth: usize,
    /// Number of bases to place, at most one per quadrant
    pub base_count: usize,
    /// Number of robots spawned at base centres
    pub robot_count: usize,
    /// Length of a full door in cells
    pub door_length: usize,
    /// Smallest distance between a split wall and the region bounds
    pub min_room_span: usize,
    /// Share of each side of a region that may not receive a split, percent
    pub split_margin_percent: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: Grid::WIDTH,
            height: Grid::HEIGHT,
            depth: 4,
            base_count: 3,
            robot_count: 2,
            door_length: 15,
            min_room_span: 6,
            split_margin_percent: 35,
        }
    }
}

impl GeneratorConfig {
    /// Number of quadrants bases are spread across
    pub const QUADRANTS: usize = 4;

    /// Check that generation can succeed with these parameters
    ///
    /// Besides plain range checks, every region that could appear down to
    /// [Self::depth] levels is checked for a non-empty split band. Child
    /// sizes are monotonic in the split offset, so trying both ends of every
    /// band on every axis the aspect ratio allows covers all trees.
    pub fn validate(&self) -> Result<(), GenerationError> {
        let invalid = |msg: String| Err(GenerationError::InvalidConfig(msg));

        if self.width < 3 || self.height < 3 {
            return invalid(format!(
                "grid of {}x{} has no interior",
                self.width, self.height
            ));
        }
        if self.depth < 2 {
            return invalid(format!(
                "split depth {} leaves no quadrants, at least 2 is required",
                self.depth
            ));
        }
        if self.base_count > Self::QUADRANTS {
            return invalid(format!(
                "{} bases requested, but only {} quadrants exist",
                self.base_count,
                Self::QUADRANTS
            ));
        }
        if self.robot_count > self.base_count {
            return invalid(format!(
                "{} robots requested, but only {} bases",
                self.robot_count, self.base_count
            ));
        }
        if self.door_length == 0 {
            return invalid("door length must be positive".to_string());
        }
        if self.split_margin_percent >= 50 {
            return invalid(format!(
                "split margin of {}% leaves no central band",
                self.split_margin_percent
            ));
        }

        let root = Rect::new(0, 0, self.width - 1, self.height - 1);
        self.check_splittable(root, self.depth)
    }

    fn check_splittable(&self, rect: Rect, levels: usize) -> Result<(), GenerationError> {
        if levels == 0 {
            return Ok(());
        }
        let axes = match forced_axis(rect) {
            Some(axis) => vec![axis],
            None => vec![Axis::X, Axis::Y],
        };
        for axis in axes {
            let (lo, hi) = split_band(rect, axis, self)?;
            for offset in [lo, hi] {
                let (left, right) = child_rects(rect, Split { axis, offset });
                self.check_splittable(left, levels - 1)?;
                self.check_splittable(right, levels - 1)?;
            }
        }
        Ok(())
    }
}
