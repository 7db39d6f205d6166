//! Full generation pipeline

use log::info;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;

use crate::bases::{place_bases, Base};
use crate::config::GeneratorConfig;
use crate::connectivity::RegionGraph;
use crate::doors::{cut_doors, Door};
use crate::error::GenerationError;
use crate::grid::{Grid, Point};
use crate::obstacles::{generate_obstacles, Obstacle};
use crate::partition::PartitionTree;
use crate::splitter::split_to_depth;
use crate::transform::{WorldBox, WorldTransform};
use crate::walls::{border_positions, extract_wall_blocks};

/// Result of a generation run
#[derive(Clone, Debug)]
pub struct FloorPlan {
    /// Final carved grid
    pub grid: Grid,
    /// Partition tree the grid was carved from
    pub tree: PartitionTree,
    /// Every door, in the order the walls were processed
    pub doors: Vec<Door>,
    /// Bases in placement order
    pub bases: Vec<Base>,
    /// Robot spawn points, grid space
    pub spawns: Vec<Point>,
    pub obstacles: Vec<Obstacle>,
}

/// World-space description handed to the world file writer
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorldDescription {
    pub walls: Vec<WorldBox>,
    pub bases: Vec<WorldBox>,
    pub robots: Vec<[f64; 2]>,
    pub obstacles: Vec<Obstacle>,
}

impl WorldDescription {
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl FloorPlan {
    /// Internal wall blocks, excluding the outer border
    pub fn wall_blocks(&self) -> Vec<WorldBox> {
        let mut used = border_positions(&self.grid);
        extract_wall_blocks(&self.tree, &self.grid, &mut used)
    }

    /// Door adjacency between rooms, as carved in the grid
    pub fn region_graph(&self) -> RegionGraph {
        RegionGraph::from_grid(&self.tree, &self.grid)
    }

    /// Convert walls, bases and robots to world space
    pub fn world(&self) -> WorldDescription {
        let transform = WorldTransform::for_grid(&self.grid);
        WorldDescription {
            walls: self.wall_blocks(),
            bases: self
                .bases
                .iter()
                .map(|b| transform.bounds_to_world(b.corner, b.end()))
                .collect(),
            robots: self
                .spawns
                .iter()
                .map(|p| transform.point_to_world(*p))
                .collect(),
            obstacles: self.obstacles.clone(),
        }
    }
}

/// Floor plan generator
///
/// Each generator owns its random source; runs with the same seed and
/// configuration produce the same plan.
pub struct MapGenerator {
    config: GeneratorConfig,
    random: StdRng,
}

impl MapGenerator {
    pub fn new(config: GeneratorConfig, seed: Option<u64>) -> Self {
        Self {
            config,
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a new floor plan
    ///
    /// The configuration is validated before anything is carved. Then the
    /// grid is split, doors are cut and bases are placed, in that order.
    pub fn generate(&mut self) -> Result<FloorPlan, GenerationError> {
        self.config.validate()?;
        let config = &self.config;
        let random = &mut self.random;

        let mut grid = Grid::new(config.width, config.height);
        let mut tree = PartitionTree::new(&grid);
        let root = tree.root();

        split_to_depth(&mut tree, root, config.depth, &mut grid, config, random)?;
        info!(
            "split {}x{} grid into {} rooms",
            config.width,
            config.height,
            tree.leaves().len()
        );

        let doors = cut_doors(&tree, &mut grid, config, random)?;
        info!("cut {} doors", doors.len());

        let placement = place_bases(&mut tree, &mut grid, config, random)?;
        info!(
            "placed {} bases, {} robot spawns",
            placement.bases.len(),
            placement.spawns.len()
        );

        let obstacles = generate_obstacles(random);

        Ok(FloorPlan {
            grid,
            tree,
            doors,
            bases: placement.bases,
            spawns: placement.spawns,
            obstacles,
        })
    }
}
