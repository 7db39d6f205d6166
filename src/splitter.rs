//! Recursive splitting of tree leaves
//!
//! Every split picks an axis, picks an offset inside the central band of
//! that axis, carves a full-length wall into the grid and attaches the two
//! resulting regions as children.

use log::debug;
use rand::Rng;

use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::grid::{Cell, Grid, Point};
use crate::partition::{Axis, NodeId, PartitionTree, Rect, Split};

/// Range of valid split offsets along `axis`, inclusive
///
/// The outer `split_margin_percent` of the span on each side is excluded,
/// and never less than `min_room_span` cells, so that both children keep a
/// usable interior.
pub fn split_band(
    rect: Rect,
    axis: Axis,
    config: &GeneratorConfig,
) -> Result<(usize, usize), GenerationError> {
    let (min, max) = rect.span(axis);
    let size = max - min;
    let margin = (size * config.split_margin_percent / 100).max(config.min_room_span);

    let lo = min + margin;
    match max.checked_sub(margin) {
        Some(hi) if lo <= hi => Ok((lo, hi)),
        _ => Err(GenerationError::DegenerateRegion { rect, axis }),
    }
}

/// Axis imposed by the aspect ratio, if any
///
/// Regions more than 1.5 times wider than tall are split at an x offset,
/// regions more than 1.5 times taller than wide at a y offset.
pub fn forced_axis(rect: Rect) -> Option<Axis> {
    let (w, h) = (rect.width(), rect.height());
    if 2 * w > 3 * h {
        Some(Axis::X)
    } else if 2 * h > 3 * w {
        Some(Axis::Y)
    } else {
        None
    }
}

pub fn choose_axis<R: Rng>(rect: Rect, rng: &mut R) -> Axis {
    forced_axis(rect).unwrap_or_else(|| if rng.gen_bool(0.5) { Axis::X } else { Axis::Y })
}

/// Regions on both sides of a wall at `offset`
pub fn child_rects(rect: Rect, split: Split) -> (Rect, Rect) {
    let Rect {
        x_min,
        y_min,
        x_max,
        y_max,
    } = rect;
    let r = split.offset;
    match split.axis {
        Axis::X => (
            Rect::new(x_min, y_min, r, y_max),
            Rect::new(r, y_min, x_max, y_max),
        ),
        Axis::Y => (
            Rect::new(x_min, y_min, x_max, r),
            Rect::new(x_min, r, x_max, y_max),
        ),
    }
}

/// Cells of a wall at `offset`, spanning the full perpendicular extent
pub fn wall_cells(rect: Rect, split: Split) -> Vec<Point> {
    match split.axis {
        Axis::X => (rect.y_min..=rect.y_max)
            .map(|y| Point::new(split.offset, y))
            .collect(),
        Axis::Y => (rect.x_min..=rect.x_max)
            .map(|x| Point::new(x, split.offset))
            .collect(),
    }
}

/// Split leaf `id` in two and carve the dividing wall into `grid`
pub fn split<R: Rng>(
    tree: &mut PartitionTree,
    id: NodeId,
    grid: &mut Grid,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<(NodeId, NodeId), GenerationError> {
    let rect = tree.node(id).rect();
    let axis = choose_axis(rect, rng);
    let (lo, hi) = split_band(rect, axis, config)?;
    let split = Split {
        axis,
        offset: rng.gen_range(lo..=hi),
    };

    let wall = wall_cells(rect, split);
    for p in &wall {
        grid.set(*p, Cell::Wall);
    }
    debug!(
        "split node {id} {rect} along {:?} at {}",
        split.axis, split.offset
    );

    Ok(tree.attach_split(id, split, wall, child_rects(rect, split), grid))
}

/// Split every leaf below `id` once
///
/// Nodes that already have children are not split again; both children are
/// visited instead.
pub fn split_leaves<R: Rng>(
    tree: &mut PartitionTree,
    id: NodeId,
    grid: &mut Grid,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<(), GenerationError> {
    match tree.node(id).children() {
        None => split(tree, id, grid, config, rng).map(|_| ()),
        Some((left, right)) => {
            split_leaves(tree, left, grid, config, rng)?;
            split_leaves(tree, right, grid, config, rng)
        }
    }
}

/// Split every leaf below `id` `depth` times, producing `2^depth` leaves
pub fn split_to_depth<R: Rng>(
    tree: &mut PartitionTree,
    id: NodeId,
    depth: usize,
    grid: &mut Grid,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<(), GenerationError> {
    for _ in 0..depth {
        split_leaves(tree, id, grid, config, rng)?;
    }
    Ok(())
}
