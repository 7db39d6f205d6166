//! Base placement
//!
//! Bases are spread over the four quadrants given by the first two levels
//! of the tree, at most one per quadrant. A quadrant's leaf is picked by
//! random descent for a bounded number of attempts; after that every leaf of
//! the remaining quadrants is searched, so placement either succeeds or
//! reports that no location is left.

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::grid::{Cell, Grid, Point};
use crate::partition::{NodeId, PartitionTree, Rect, Side};

/// Side length of a base, in cells
pub const BASE_SIZE: usize = 20;

/// Random descents tried before falling back to the exhaustive search
const RANDOM_ATTEMPTS: usize = 64;

/// Two binary choices from the root selecting each quadrant
pub const QUADRANTS: [[Side; 2]; 4] = [
    [Side::Left, Side::Left],
    [Side::Left, Side::Right],
    [Side::Right, Side::Left],
    [Side::Right, Side::Right],
];

/// Square home area of a robot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Base {
    /// Top-left cell
    pub corner: Point,
    /// Index into [QUADRANTS]
    pub quadrant: usize,
    /// Leaf holding the base
    pub node: NodeId,
}

impl Base {
    /// Bottom-right cell
    pub fn end(&self) -> Point {
        Point::new(self.corner.x + BASE_SIZE - 1, self.corner.y + BASE_SIZE - 1)
    }

    /// Inclusive cell bounds
    pub fn rect(&self) -> Rect {
        let end = self.end();
        Rect::new(self.corner.x, self.corner.y, end.x, end.y)
    }

    pub fn center(&self) -> Point {
        let half = (BASE_SIZE - 1) / 2;
        Point::new(self.corner.x + half, self.corner.y + half)
    }

    pub fn overlaps(&self, other: &Base) -> bool {
        let (a, b) = (self.rect(), other.rect());
        a.x_min <= b.x_max && b.x_min <= a.x_max && a.y_min <= b.y_max && b.y_min <= a.y_max
    }

    pub fn cells(&self) -> impl Iterator<Item = Point> {
        let Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        } = self.rect();
        (y_min..=y_max).flat_map(move |y| (x_min..=x_max).map(move |x| Point::new(x, y)))
    }
}

/// Placed bases and the robot spawn points derived from them
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasePlacement {
    pub bases: Vec<Base>,
    pub spawns: Vec<Point>,
}

/// Nodes at the root of each of the four quadrants
pub fn quadrant_nodes(tree: &PartitionTree) -> Result<[NodeId; 4], GenerationError> {
    let shallow = || GenerationError::ShallowTree {
        depth: tree.depth(),
    };
    let mut nodes = [0; 4];
    for (node, path) in nodes.iter_mut().zip(QUADRANTS.iter()) {
        *node = tree.descend(path).ok_or_else(shallow)?;
    }
    Ok(nodes)
}

/// Follow random child choices from `id` down to a leaf
fn random_leaf<R: Rng>(tree: &PartitionTree, id: NodeId, rng: &mut R) -> NodeId {
    let mut id = id;
    while let Some((left, right)) = tree.node(id).children() {
        id = if rng.gen_bool(0.5) { left } else { right };
    }
    id
}

/// Pick a pool slot and an eligible leaf below it
fn find_base_leaf<R: Rng>(
    tree: &PartitionTree,
    pool: &[(usize, NodeId)],
    rng: &mut R,
) -> Option<(usize, NodeId)> {
    if pool.is_empty() {
        return None;
    }
    for _ in 0..RANDOM_ATTEMPTS {
        let slot = rng.gen_range(0..pool.len());
        let leaf = random_leaf(tree, pool[slot].1, rng);
        if tree.node(leaf).is_base_eligible() {
            return Some((slot, leaf));
        }
    }

    warn!(
        "no base location after {RANDOM_ATTEMPTS} random descents, searching {} quadrants",
        pool.len()
    );
    let candidates = pool
        .iter()
        .enumerate()
        .flat_map(|(slot, (_, node))| {
            tree.leaves_under(*node)
                .into_iter()
                .filter(move |leaf| tree.node(*leaf).is_base_eligible())
                .map(move |leaf| (slot, leaf))
        })
        .collect::<Vec<_>>();
    candidates.choose(rng).copied()
}

/// Random top-left corner for a base inside `rect`
///
/// The corner is drawn from the central third of the positions that keep
/// the base clear of the region's walls. The bounds of `rect` must
/// be at least `BASE_SIZE + 2` apart on both axes.
pub(crate) fn base_corner<R: Rng>(rect: Rect, rng: &mut R) -> Point {
    fn central_third<R: Rng>(min: usize, max: usize, rng: &mut R) -> usize {
        debug_assert!(max - min > BASE_SIZE + 1, "region too small for a base");
        let lo = min + 1;
        let hi = max - (BASE_SIZE + 1);
        let third = (hi - lo) / 3;
        rng.gen_range(lo + third..=hi - third)
    }
    let x = central_third(rect.x_min, rect.x_max, rng);
    let y = central_third(rect.y_min, rect.y_max, rng);
    Point::new(x, y)
}

/// Centres of the first `count` bases, in placement order
pub fn spawn_points(bases: &[Base], count: usize) -> Vec<Point> {
    bases.iter().take(count).map(Base::center).collect()
}

/// Place `config.base_count` bases and carve them into `grid`
pub fn place_bases<R: Rng>(
    tree: &mut PartitionTree,
    grid: &mut Grid,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<BasePlacement, GenerationError> {
    let mut pool = quadrant_nodes(tree)?
        .into_iter()
        .enumerate()
        .collect::<Vec<_>>();

    let mut bases = Vec::with_capacity(config.base_count);
    for base in 0..config.base_count {
        let (slot, leaf) = find_base_leaf(tree, &pool, rng)
            .ok_or(GenerationError::NoEligibleBaseLocation { base })?;
        let (quadrant, _) = pool.remove(slot);

        tree.mark_base(leaf);
        let placed = Base {
            corner: base_corner(tree.node(leaf).rect(), rng),
            quadrant,
            node: leaf,
        };
        for p in placed.cells() {
            if grid.is_interior(p) {
                grid.set(p, Cell::Base);
            }
        }
        debug!(
            "base {base} in quadrant {quadrant}, leaf {leaf}, corner {:?}",
            placed.corner
        );
        bases.push(placed);
    }

    let spawns = spawn_points(&bases, config.robot_count);
    Ok(BasePlacement { bases, spawns })
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    use crate::bases::{base_corner, place_bases, spawn_points, Base, BASE_SIZE};
    use crate::config::GeneratorConfig;
    use crate::error::GenerationError;
    use crate::grid::{Cell, Grid, Point};
    use crate::partition::{Axis, NodeId, PartitionTree, Rect, Split};
    use crate::splitter::{child_rects, split_to_depth, wall_cells};

    fn carve(
        tree: &mut PartitionTree,
        grid: &mut Grid,
        id: NodeId,
        axis: Axis,
        offset: usize,
    ) -> (NodeId, NodeId) {
        let rect = tree.node(id).rect();
        let split = Split { axis, offset };
        let wall = wall_cells(rect, split);
        for p in &wall {
            grid.set(*p, Cell::Wall);
        }
        tree.attach_split(id, split, wall, child_rects(rect, split), grid)
    }

    #[test]
    fn corner_is_in_central_third() {
        let mut rng = StdRng::seed_from_u64(0);
        let rect = Rect::new(0, 0, 180, 50);
        for _ in 0..100 {
            let corner = base_corner(rect, &mut rng);
            assert!((53..=107).contains(&corner.x));
            assert!((10..=20).contains(&corner.y));
        }
    }

    #[test]
    fn smallest_region_still_fits_a_base() {
        let mut rng = StdRng::seed_from_u64(0);
        let rect = Rect::new(10, 10, 33, 33);
        for _ in 0..20 {
            let corner = base_corner(rect, &mut rng);
            assert!((11..=12).contains(&corner.x) && (11..=12).contains(&corner.y));
            assert!(corner.x + BASE_SIZE - 1 < rect.x_max);
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "region too small for a base")]
    fn corner_rejects_region_without_room_for_a_base() {
        let mut rng = StdRng::seed_from_u64(0);
        base_corner(Rect::new(10, 10, 31, 60), &mut rng);
    }

    #[test]
    fn spawns_are_base_centres() {
        let bases = [
            Base {
                corner: Point::new(10, 20),
                quadrant: 0,
                node: 3,
            },
            Base {
                corner: Point::new(100, 120),
                quadrant: 3,
                node: 9,
            },
        ];
        assert_eq!(
            spawn_points(&bases, 2),
            vec![Point::new(19, 29), Point::new(109, 129)]
        );
        assert_eq!(spawn_points(&bases[..1], 2), vec![Point::new(19, 29)]);
        assert!(bases[0].overlaps(&bases[0]));
        assert!(!bases[0].overlaps(&bases[1]));
    }

    #[test]
    fn shallow_tree_has_no_quadrants() {
        let mut grid = Grid::new(200, 100);
        let mut tree = PartitionTree::new(&grid);
        let root = tree.root();
        carve(&mut tree, &mut grid, root, Axis::X, 100);
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(
            place_bases(&mut tree, &mut grid, &GeneratorConfig::default(), &mut rng),
            Err(GenerationError::ShallowTree { depth: 1 })
        );
    }

    #[test]
    fn third_base_fails_with_two_eligible_quadrants() {
        let mut grid = Grid::new(200, 100);
        let mut tree = PartitionTree::new(&grid);
        let root = tree.root();
        let (left, right) = carve(&mut tree, &mut grid, root, Axis::X, 180);
        carve(&mut tree, &mut grid, left, Axis::Y, 50);
        carve(&mut tree, &mut grid, right, Axis::Y, 50);
        let mut rng = StdRng::seed_from_u64(5);

        let res = place_bases(&mut tree, &mut grid, &GeneratorConfig::default(), &mut rng);
        assert_eq!(
            res,
            Err(GenerationError::NoEligibleBaseLocation { base: 2 })
        );
        assert_eq!(grid.count(Cell::Base), 2 * BASE_SIZE * BASE_SIZE);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]
        #[test]
        fn bases_are_disjoint_and_spread_over_quadrants(seed in any::<u64>()) {
            let config = GeneratorConfig::default();
            let mut grid = Grid::default();
            let mut tree = PartitionTree::new(&grid);
            let root = tree.root();
            let mut rng = StdRng::seed_from_u64(seed);
            split_to_depth(&mut tree, root, 4, &mut grid, &config, &mut rng).unwrap();

            let placement = place_bases(&mut tree, &mut grid, &config, &mut rng).unwrap();
            let bases = &placement.bases;
            prop_assert_eq!(bases.len(), 3);
            prop_assert!(bases.iter().map(|b| b.quadrant).all_unique());
            prop_assert!(bases.iter().map(|b| b.node).all_unique());

            for (a, b) in bases.iter().tuple_combinations() {
                prop_assert!(!a.overlaps(b));
            }
            for base in bases {
                let leaf = tree.node(base.node);
                prop_assert!(leaf.is_leaf() && leaf.is_border() && leaf.base_present());
                prop_assert!(base.cells().all(|p| leaf.rect().contains_interior(p)));
                prop_assert!(base.cells().all(|p| grid.get(p) == Cell::Base));
            }
            prop_assert_eq!(grid.count(Cell::Base), 3 * BASE_SIZE * BASE_SIZE);
            prop_assert_eq!(
                &placement.spawns,
                &vec![bases[0].center(), bases[1].center()]
            );
        }
    }
}
