//! Binary partition tree over rectangular grid regions
//!
//! Nodes live in an arena and are addressed by [NodeId]. Every node keeps
//! the index of its parent, so walking upwards is a plain loop over parent
//! indices instead of a chain of back-references.

use std::collections::HashSet;
use std::fmt;

use crate::bases::BASE_SIZE;
use crate::grid::{Grid, Point};

/// Index of a node in the [PartitionTree] arena
pub type NodeId = usize;

/// Axis along which a region is divided
///
/// [Axis::X] places the dividing wall at an x offset (a vertical wall),
/// [Axis::Y] at a y offset (a horizontal wall).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Inclusive rectangle `[x_min, y_min]–[x_max, y_max]` of grid cells
///
/// The bounds are the wall lines enclosing the region: a child rectangle
/// shares one bound with its sibling, the wall that separates them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x_min: usize,
    pub y_min: usize,
    pub x_max: usize,
    pub y_max: usize,
}

impl Rect {
    pub fn new(x_min: usize, y_min: usize, x_max: usize, y_max: usize) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Distance between the left and right bounds
    pub fn width(&self) -> usize {
        self.x_max - self.x_min
    }

    /// Distance between the top and bottom bounds
    pub fn height(&self) -> usize {
        self.y_max - self.y_min
    }

    /// Lower and upper bound along `axis`
    pub fn span(&self, axis: Axis) -> (usize, usize) {
        match axis {
            Axis::X => (self.x_min, self.x_max),
            Axis::Y => (self.y_min, self.y_max),
        }
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.x_min <= other.x_min
            && self.y_min <= other.y_min
            && other.x_max <= self.x_max
            && other.y_max <= self.y_max
    }

    /// Whether `p` lies strictly between the bounds
    pub fn contains_interior(&self, p: Point) -> bool {
        self.x_min < p.x && p.x < self.x_max && self.y_min < p.y && p.y < self.y_max
    }

    /// Whether any bound lies on the outer ring of `grid`
    pub fn touches_border(&self, grid: &Grid) -> bool {
        self.x_min == 0
            || self.y_min == 0
            || self.x_max == grid.width() - 1
            || self.y_max == grid.height() - 1
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}]–[{}, {}]",
            self.x_min, self.y_min, self.x_max, self.y_max
        )
    }
}

/// Dividing wall of a non-leaf node
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Split {
    pub axis: Axis,
    pub offset: usize,
}

/// Which child to descend into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// One rectangular region of the map
#[derive(Clone, Debug)]
pub struct PartitionNode {
    parent: Option<NodeId>,
    rect: Rect,
    split: Option<Split>,
    /// Ordered cells of the dividing wall, empty for leaves
    wall: Vec<Point>,
    /// Cells on this node's wall where a descendant wall ends
    unusable: HashSet<Point>,
    children: Option<(NodeId, NodeId)>,
    base_present: bool,
    base_possible: bool,
    is_border: bool,
}

impl PartitionNode {
    /// Usable room inside a region needed to host a base, plus wall margin
    const BASE_ROOM: usize = BASE_SIZE + 2;

    fn new(parent: Option<NodeId>, rect: Rect, grid: &Grid) -> Self {
        Self {
            parent,
            rect,
            split: None,
            wall: Vec::new(),
            unusable: HashSet::new(),
            children: None,
            base_present: false,
            base_possible: rect.width() > Self::BASE_ROOM && rect.height() > Self::BASE_ROOM,
            is_border: rect.touches_border(grid),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn split(&self) -> Option<Split> {
        self.split
    }

    pub fn wall(&self) -> &[Point] {
        &self.wall
    }

    pub fn unusable(&self) -> &HashSet<Point> {
        &self.unusable
    }

    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        self.children
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        self.children.map(|(left, right)| match side {
            Side::Left => left,
            Side::Right => right,
        })
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn base_present(&self) -> bool {
        self.base_present
    }

    pub fn base_possible(&self) -> bool {
        self.base_possible
    }

    pub fn is_border(&self) -> bool {
        self.is_border
    }

    /// Leaf that may still receive a base
    pub fn is_base_eligible(&self) -> bool {
        self.is_leaf() && !self.base_present && self.base_possible && self.is_border
    }
}

/// Arena-backed binary tree of regions, rooted at the whole grid
#[derive(Clone, Debug)]
pub struct PartitionTree {
    nodes: Vec<PartitionNode>,
}

impl PartitionTree {
    /// Tree with a single root node covering `grid`
    pub fn new(grid: &Grid) -> Self {
        let rect = Rect::new(0, 0, grid.width() - 1, grid.height() - 1);
        Self {
            nodes: vec![PartitionNode::new(None, rect, grid)],
        }
    }

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn node(&self, id: NodeId) -> &PartitionNode {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Record the split of leaf `id` and attach its two children
    ///
    /// The two endpoints of `wall` are marked unusable on every ancestor of
    /// `id`, since that is where this wall joins theirs.
    pub(crate) fn attach_split(
        &mut self,
        id: NodeId,
        split: Split,
        wall: Vec<Point>,
        children: (Rect, Rect),
        grid: &Grid,
    ) -> (NodeId, NodeId) {
        debug_assert!(self.nodes[id].is_leaf(), "node {id} is already split");

        let left = self.push(PartitionNode::new(Some(id), children.0, grid));
        let right = self.push(PartitionNode::new(Some(id), children.1, grid));

        let endpoints = [wall.first().copied(), wall.last().copied()];
        let node = &mut self.nodes[id];
        node.split = Some(split);
        node.wall = wall;
        node.children = Some((left, right));

        let mut ancestor = self.nodes[id].parent;
        while let Some(a) = ancestor {
            let node = &mut self.nodes[a];
            node.unusable.extend(endpoints.iter().flatten());
            ancestor = node.parent;
        }

        (left, right)
    }

    pub(crate) fn mark_base(&mut self, id: NodeId) {
        self.nodes[id].base_present = true;
    }

    fn push(&mut self, node: PartitionNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// All leaves, left to right
    pub fn leaves(&self) -> Vec<NodeId> {
        self.leaves_under(self.root())
    }

    /// Leaves of the subtree rooted at `id`, left to right
    pub fn leaves_under(&self, id: NodeId) -> Vec<NodeId> {
        self.post_order_from(id)
            .into_iter()
            .filter(|n| self.nodes[*n].is_leaf())
            .collect()
    }

    /// Every node, children before their parent
    pub fn post_order(&self) -> Vec<NodeId> {
        self.post_order_from(self.root())
    }

    fn post_order_from(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(id, false)];
        while let Some((n, expanded)) = stack.pop() {
            match self.nodes[n].children {
                Some((left, right)) if !expanded => {
                    stack.push((n, true));
                    stack.push((right, false));
                    stack.push((left, false));
                }
                _ => order.push(n),
            }
        }
        order
    }

    /// Length of the longest root-to-leaf path, in edges
    pub fn depth(&self) -> usize {
        fn depth_of(tree: &PartitionTree, id: NodeId) -> usize {
            match tree.nodes[id].children {
                Some((left, right)) => 1 + depth_of(tree, left).max(depth_of(tree, right)),
                None => 0,
            }
        }
        depth_of(self, self.root())
    }

    /// Node reached from the root by following `path`
    ///
    /// Returns `None` if a leaf is reached before the path is exhausted.
    pub fn descend(&self, path: &[Side]) -> Option<NodeId> {
        path.iter()
            .try_fold(self.root(), |id, side| self.nodes[id].child(*side))
    }

    /// Leaf whose interior contains `p`
    ///
    /// Returns `None` for points on a wall line.
    pub fn leaf_at(&self, p: Point) -> Option<NodeId> {
        let mut id = self.root();
        if !self.nodes[id].rect.contains_interior(p) {
            return None;
        }
        while let (Some(split), Some((left, right))) =
            (self.nodes[id].split, self.nodes[id].children)
        {
            let coord = match split.axis {
                Axis::X => p.x,
                Axis::Y => p.y,
            };
            id = match coord.cmp(&split.offset) {
                std::cmp::Ordering::Less => left,
                std::cmp::Ordering::Greater => right,
                std::cmp::Ordering::Equal => return None,
            };
        }
        Some(id)
    }
}
