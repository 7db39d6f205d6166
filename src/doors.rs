//! Door cutting
//!
//! Walls are processed children first, so every wall below a node is final
//! before the node's own wall receives its doors. Cells where a descendant
//! wall joins are never opened.

use std::cmp::Reverse;
use std::collections::HashSet;

use itertools::Itertools;
use log::debug;
use rand::Rng;

use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::grid::{Cell, Grid, Point};
use crate::partition::{NodeId, PartitionTree};

/// Gap carved into the wall of a node
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Door {
    /// Node whose wall holds the door
    pub node: NodeId,
    /// Cleared cells, in wall order
    pub cells: Vec<Point>,
}

/// Maximal runs of `wall` not interrupted by an unusable cell
pub fn wall_parts(wall: &[Point], unusable: &HashSet<Point>) -> Vec<Vec<Point>> {
    let mut parts = Vec::new();
    for (usable, run) in &wall.iter().chunk_by(|p| !unusable.contains(*p)) {
        if usable {
            parts.push(run.copied().collect());
        }
    }
    parts
}

/// Clear a door in `part` and return the cleared cells
///
/// Parts long enough get a full `door_length` door at a random offset that
/// keeps both part endpoints intact. Shorter parts are opened entirely,
/// except for their two endpoints.
pub fn open_door<R: Rng>(
    part: &[Point],
    door_length: usize,
    grid: &mut Grid,
    rng: &mut R,
) -> Vec<Point> {
    let cells = if part.len() > door_length + 1 {
        let start = rng.gen_range(1..=part.len() - door_length - 1);
        &part[start..start + door_length]
    } else if part.len() > 2 {
        &part[1..part.len() - 1]
    } else {
        &part[..0]
    };

    for p in cells {
        grid.set(*p, Cell::Empty);
    }
    cells.to_vec()
}

/// Cut the doors of a single wall
///
/// One large part (at least `door_length` long) always receives a door, and
/// every other large part receives one with probability 1/3. Without any
/// large part, the longest part is opened as far as it goes.
pub fn cut_wall_doors<R: Rng>(
    node: NodeId,
    wall: &[Point],
    unusable: &HashSet<Point>,
    config: &GeneratorConfig,
    grid: &mut Grid,
    rng: &mut R,
) -> Result<Vec<Door>, GenerationError> {
    let parts = wall_parts(wall, unusable);
    let large = parts
        .iter()
        .filter(|part| part.len() >= config.door_length)
        .collect::<Vec<_>>();

    let mut doors = Vec::new();
    if large.is_empty() {
        let longest = parts
            .iter()
            .min_by_key(|part| Reverse(part.len()))
            .filter(|part| part.len() > 2)
            .ok_or(GenerationError::WallConsumed { node })?;
        doors.push(open_door(longest, config.door_length, grid, rng));
    } else {
        let chosen = rng.gen_range(0..large.len());
        for (i, part) in large.iter().enumerate() {
            if i == chosen || rng.gen_ratio(1, 3) {
                doors.push(open_door(part, config.door_length, grid, rng));
            }
        }
    }

    debug!(
        "node {node}: {} wall parts, {} large, {} doors",
        parts.len(),
        large.len(),
        doors.len()
    );
    Ok(doors
        .into_iter()
        .map(|cells| Door { node, cells })
        .collect())
}

/// Cut doors into every wall of `tree`, children before parents
pub fn cut_doors<R: Rng>(
    tree: &PartitionTree,
    grid: &mut Grid,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Vec<Door>, GenerationError> {
    let mut doors = Vec::new();
    for id in tree.post_order() {
        let node = tree.node(id);
        if node.is_leaf() {
            continue;
        }
        doors.extend(cut_wall_doors(
            id,
            node.wall(),
            node.unusable(),
            config,
            grid,
            rng,
        )?);
    }
    Ok(doors)
}
