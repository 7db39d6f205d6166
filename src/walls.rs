//! Conversion of carved walls into world wall blocks

use std::collections::HashSet;

use itertools::Itertools;

use crate::grid::{Cell, Grid, Point};
use crate::partition::PartitionTree;
use crate::transform::{WorldBox, WorldTransform};

/// Every cell on the outer ring of `grid`
pub fn border_positions(grid: &Grid) -> HashSet<Point> {
    let (w, h) = (grid.width(), grid.height());
    let columns = (0..h).flat_map(|y| [Point::new(0, y), Point::new(w - 1, y)]);
    let rows = (0..w).flat_map(|x| [Point::new(x, 0), Point::new(x, h - 1)]);
    columns.chain(rows).collect()
}

/// Straight runs of wall cells not yet in `used`, children before parents
///
/// Each run is returned as its first and last cell. Every emitted cell is
/// added to `used`, so a cell shared by two walls belongs to the run found
/// first.
pub fn wall_runs(
    tree: &PartitionTree,
    grid: &Grid,
    used: &mut HashSet<Point>,
) -> Vec<(Point, Point)> {
    let mut runs = Vec::new();
    for id in tree.post_order() {
        let mut node_runs: Vec<Vec<Point>> = Vec::new();
        for (free, run) in &tree
            .node(id)
            .wall()
            .iter()
            .chunk_by(|p| grid.get(**p) == Cell::Wall && !used.contains(*p))
        {
            if free {
                node_runs.push(run.copied().collect());
            }
        }

        for run in node_runs {
            if let (Some(first), Some(last)) = (run.first(), run.last()) {
                runs.push((*first, *last));
            }
            used.extend(run);
        }
    }
    runs
}

/// World boxes for every internal wall run of `tree`
///
/// `used` should be seeded with [border_positions] so that the outer wall
/// is not emitted again as internal walls.
pub fn extract_wall_blocks(
    tree: &PartitionTree,
    grid: &Grid,
    used: &mut HashSet<Point>,
) -> Vec<WorldBox> {
    let transform = WorldTransform::for_grid(grid);
    wall_runs(tree, grid, used)
        .into_iter()
        .map(|(start, end)| transform.bounds_to_world(start, end))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    use crate::config::GeneratorConfig;
    use crate::doors::cut_doors;
    use crate::grid::{Cell, Grid, Point};
    use crate::partition::{Axis, PartitionTree, Split};
    use crate::splitter::{child_rects, split_to_depth, wall_cells};
    use crate::walls::{border_positions, extract_wall_blocks, wall_runs};

    /// Cells between the two ends of a straight run
    fn run_cells(start: Point, end: Point) -> Vec<Point> {
        if start.x == end.x {
            (start.y..=end.y).map(|y| Point::new(start.x, y)).collect()
        } else {
            assert_eq!(start.y, end.y);
            (start.x..=end.x).map(|x| Point::new(x, start.y)).collect()
        }
    }

    #[test]
    fn border_ring_size() {
        let grid = Grid::new(30, 20);
        let border = border_positions(&grid);
        assert_eq!(border.len(), 2 * 30 + 2 * 18);
        assert!(border.iter().all(|p| grid.is_border(*p)));
    }

    #[test]
    fn junctions_belong_to_the_child_wall() {
        let mut grid = Grid::new(30, 20);
        let mut tree = PartitionTree::new(&grid);

        let rect = tree.node(0).rect();
        let split = Split {
            axis: Axis::X,
            offset: 15,
        };
        let wall = wall_cells(rect, split);
        for p in &wall {
            grid.set(*p, Cell::Wall);
        }
        let (left, _) = tree.attach_split(0, split, wall, child_rects(rect, split), &grid);
        for y in 5..10 {
            grid.set(Point::new(15, y), Cell::Empty);
        }

        let rect = tree.node(left).rect();
        let split = Split {
            axis: Axis::Y,
            offset: 12,
        };
        let wall = wall_cells(rect, split);
        for p in &wall {
            grid.set(*p, Cell::Wall);
        }
        tree.attach_split(left, split, wall, child_rects(rect, split), &grid);

        let mut used = border_positions(&grid);
        let runs = wall_runs(&tree, &grid, &mut used);
        assert_eq!(
            runs,
            vec![
                (Point::new(1, 12), Point::new(15, 12)),
                (Point::new(15, 1), Point::new(15, 4)),
                (Point::new(15, 10), Point::new(15, 11)),
                (Point::new(15, 13), Point::new(15, 18)),
            ]
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]
        #[test]
        fn every_internal_wall_cell_is_claimed_once(seed in any::<u64>()) {
            let config = GeneratorConfig::default();
            let mut grid = Grid::default();
            let mut tree = PartitionTree::new(&grid);
            let root = tree.root();
            let mut rng = StdRng::seed_from_u64(seed);
            split_to_depth(&mut tree, root, 4, &mut grid, &config, &mut rng).unwrap();
            cut_doors(&tree, &mut grid, &config, &mut rng).unwrap();

            let mut used = border_positions(&grid);
            let runs = wall_runs(&tree, &grid, &mut used);

            let mut claimed = HashSet::new();
            for (start, end) in &runs {
                for p in run_cells(*start, *end) {
                    prop_assert_eq!(grid.get(p), Cell::Wall);
                    prop_assert!(!grid.is_border(p));
                    prop_assert!(claimed.insert(p), "{:?} claimed twice", p);
                }
            }
            let internal_walls = grid.count(Cell::Wall) - border_positions(&grid).len();
            prop_assert_eq!(claimed.len(), internal_walls);

            let mut used = border_positions(&grid);
            prop_assert_eq!(
                extract_wall_blocks(&tree, &grid, &mut used).len(),
                runs.len()
            );
        }
    }
}
