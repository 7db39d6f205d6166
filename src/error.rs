//! Errors raised while generating a floor plan

use thiserror::Error;

use crate::partition::{Axis, NodeId, Rect};

/// Fatal generation failures
///
/// None of these are retried internally: they describe either a
/// configuration that cannot produce a valid map, or a broken invariant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// Configuration rejected before generation started
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Region is too small to admit any split offset on the chosen axis
    #[error("region {rect} is too small to split along {axis:?}")]
    DegenerateRegion { rect: Rect, axis: Axis },

    /// Quadrants need the first two levels of the tree
    #[error("tree of depth {depth} has no quadrants, at least 2 levels are required")]
    ShallowTree { depth: usize },

    /// Every remaining quadrant was searched without finding a usable leaf
    #[error("no eligible base location for base {base}")]
    NoEligibleBaseLocation { base: usize },

    /// A wall has no cell left that may be opened into a door
    #[error("wall of node {node} is fully consumed by junctions")]
    WallConsumed { node: NodeId },
}
