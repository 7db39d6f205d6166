//! CLI for floor plan generation

use anyhow::Context;
use clap::Parser;
use log::info;

use bsp_floorplan::{GeneratorConfig, MapGenerator};

/// Floor plan generator for simulated rescue arenas
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Random seed. Maps of a batch use consecutive seeds.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of maps to generate
    #[arg(short, long, default_value_t = 1)]
    count: u64,

    /// Number of times every room is split
    #[arg(long, default_value_t = 4)]
    depth: usize,

    /// Number of bases, one per quadrant
    #[arg(long, default_value_t = 3)]
    bases: usize,

    /// Print the grid instead of the world description
    #[arg(short, long)]
    preview: bool,

    /// Pretty-print the world description
    #[arg(long)]
    pretty: bool,
}

/// Generate maps, print world descriptions as JSON
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = GeneratorConfig {
        depth: args.depth,
        base_count: args.bases,
        robot_count: args.bases.min(2),
        ..Default::default()
    };
    config
        .validate()
        .context("invalid generator configuration")?;

    for i in 0..args.count {
        let seed = args.seed.map(|s| s.wrapping_add(i));
        let plan = MapGenerator::new(config.clone(), seed)
            .generate()
            .with_context(|| format!("failed to generate map {i}"))?;
        info!(
            "map {i}: {} rooms, {} doors, {} bases",
            plan.tree.leaves().len(),
            plan.doors.len(),
            plan.bases.len()
        );

        if args.preview {
            println!("{}\n", plan.grid.to_emojis());
        } else {
            println!("{}", plan.world().to_json(args.pretty)?);
        }
    }
    Ok(())
}
