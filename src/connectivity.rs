//! Room adjacency reconstructed from the carved grid
//!
//! Two rooms are adjacent when an opened cell on the wall between them has
//! one room on each side. Nothing but the final grid and the tree geometry
//! is consulted, so the graph reflects what was actually carved.

use std::collections::HashMap;

use petgraph::algo::connected_components;
use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};

use crate::grid::{Cell, Grid, Point};
use crate::partition::{Axis, NodeId, PartitionTree};

/// Undirected graph of leaves, connected through doors
pub struct RegionGraph {
    /// Node weights are the leaf ids in the partition tree
    graph: Graph<NodeId, (), Undirected>,
    nodes: HashMap<NodeId, NodeIndex>,
}

impl RegionGraph {
    pub fn from_grid(tree: &PartitionTree, grid: &Grid) -> Self {
        let mut graph = Graph::new_undirected();
        let nodes = tree
            .leaves()
            .into_iter()
            .map(|leaf| (leaf, graph.add_node(leaf)))
            .collect::<HashMap<_, _>>();

        for id in tree.post_order() {
            let node = tree.node(id);
            let Some(split) = node.split() else {
                continue;
            };
            for p in node.wall() {
                if grid.get(*p) == Cell::Wall || !grid.is_interior(*p) {
                    continue;
                }
                let (a, b) = match split.axis {
                    Axis::X => (Point::new(p.x - 1, p.y), Point::new(p.x + 1, p.y)),
                    Axis::Y => (Point::new(p.x, p.y - 1), Point::new(p.x, p.y + 1)),
                };
                if let (Some(a), Some(b)) = (tree.leaf_at(a), tree.leaf_at(b)) {
                    if a != b {
                        graph.update_edge(nodes[&a], nodes[&b], ());
                    }
                }
            }
        }

        Self { graph, nodes }
    }

    pub fn room_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct adjacent room pairs
    pub fn door_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Rooms reachable from `leaf` through a single door
    pub fn neighbours(&self, leaf: NodeId) -> Vec<NodeId> {
        let Some(idx) = self.nodes.get(&leaf) else {
            return Vec::new();
        };
        let mut neighbours = self
            .graph
            .neighbors(*idx)
            .map(|n| self.graph[n])
            .collect::<Vec<_>>();
        neighbours.sort_unstable();
        neighbours
    }

    /// Whether every room can be reached from every other room
    pub fn is_connected(&self) -> bool {
        connected_components(&self.graph) == 1
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    use crate::config::GeneratorConfig;
    use crate::connectivity::RegionGraph;
    use crate::doors::cut_doors;
    use crate::grid::{Cell, Grid, Point};
    use crate::partition::{Axis, PartitionTree, Split};
    use crate::splitter::{child_rects, split_to_depth, wall_cells};

    #[test]
    fn rooms_without_doors_are_disconnected() {
        let mut grid = Grid::new(40, 20);
        let mut tree = PartitionTree::new(&grid);
        let rect = tree.node(0).rect();
        let split = Split {
            axis: Axis::X,
            offset: 20,
        };
        let wall = wall_cells(rect, split);
        for p in &wall {
            grid.set(*p, Cell::Wall);
        }
        let (left, right) = tree.attach_split(0, split, wall, child_rects(rect, split), &grid);

        let graph = RegionGraph::from_grid(&tree, &grid);
        assert_eq!(graph.room_count(), 2);
        assert!(!graph.is_connected());

        grid.set(Point::new(20, 7), Cell::Empty);
        let graph = RegionGraph::from_grid(&tree, &grid);
        assert!(graph.is_connected());
        assert_eq!(graph.door_count(), 1);
        assert_eq!(graph.neighbours(left), vec![right]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]
        #[test]
        fn generated_rooms_are_connected(seed in any::<u64>()) {
            let config = GeneratorConfig::default();
            let mut grid = Grid::default();
            let mut tree = PartitionTree::new(&grid);
            let root = tree.root();
            let mut rng = StdRng::seed_from_u64(seed);
            split_to_depth(&mut tree, root, 4, &mut grid, &config, &mut rng).unwrap();
            cut_doors(&tree, &mut grid, &config, &mut rng).unwrap();

            let graph = RegionGraph::from_grid(&tree, &grid);
            prop_assert_eq!(graph.room_count(), 16);
            prop_assert!(graph.door_count() >= 15);
            prop_assert!(graph.is_connected(), "seed {} is not connected", seed);
        }
    }
}
