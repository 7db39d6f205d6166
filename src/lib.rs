//! Generate indoor floor plans by recursive binary space partitioning
//!
//! The arena is a 250×200 cell grid with a solid outer wall. The grid is
//! split recursively into rooms, doors are cut into every dividing wall so
//! that all rooms stay reachable, and bases are placed in rooms along the
//! outer wall, one per quadrant. The result converts into world-space wall
//! blocks, bases and robot positions for a simulator world file.
//!
//! # Examples
//! ```
//! use bsp_floorplan::{GeneratorConfig, MapGenerator};
//!
//! let mut gen = MapGenerator::new(GeneratorConfig::default(), Some(7));
//! let plan = gen.generate().unwrap();
//!
//! assert_eq!(plan.tree.leaves().len(), 16);
//! assert_eq!(plan.bases.len(), 3);
//! assert!(plan.region_graph().is_connected());
//!
//! let world = plan.world();
//! assert_eq!(world.robots.len(), 2);
//! println!("{}", world.to_json(true).unwrap());
//! ```
//!
//! Stages can also be run one at a time:
//! ```
//! use bsp_floorplan::config::GeneratorConfig;
//! use bsp_floorplan::doors::cut_doors;
//! use bsp_floorplan::grid::Grid;
//! use bsp_floorplan::partition::PartitionTree;
//! use bsp_floorplan::splitter::split_to_depth;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let config = GeneratorConfig::default();
//! let mut rng = StdRng::seed_from_u64(0);
//! let mut grid = Grid::default();
//! let mut tree = PartitionTree::new(&grid);
//! let root = tree.root();
//!
//! split_to_depth(&mut tree, root, 2, &mut grid, &config, &mut rng).unwrap();
//! let doors = cut_doors(&tree, &mut grid, &config, &mut rng).unwrap();
//! assert!(doors.len() >= 3);
//! ```

pub mod bases;
pub mod config;
pub mod connectivity;
pub mod doors;
pub mod error;
pub mod grid;
pub mod map_generator;
pub mod obstacles;
pub mod partition;
pub mod splitter;
pub mod transform;
pub mod walls;

pub use config::GeneratorConfig;
pub use error::GenerationError;
pub use grid::{Cell, Grid, Point};
pub use map_generator::{FloorPlan, MapGenerator, WorldDescription};
pub use transform::{WorldBox, WorldTransform};
