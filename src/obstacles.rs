//! Randomly sized obstacle boxes scattered by the simulator

use std::ops::Range;

use rand::Rng;
use serde::Serialize;

/// Obstacle dimensions in metres
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Obstacle {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Obstacle {
    const COUNT: Range<usize> = 4..8;
    const HEIGHT_CM: Range<u32> = 50..130;
    const FOOTPRINT_CM: Range<u32> = 30..220;
}

fn metres<R: Rng>(rng: &mut R, centimetres: Range<u32>) -> f64 {
    f64::from(rng.gen_range(centimetres)) / 100.0
}

/// Between four and seven obstacles, sizes in whole centimetres
pub fn generate_obstacles<R: Rng>(rng: &mut R) -> Vec<Obstacle> {
    let count = rng.gen_range(Obstacle::COUNT);
    (0..count)
        .map(|_| Obstacle {
            height: metres(rng, Obstacle::HEIGHT_CM),
            width: metres(rng, Obstacle::FOOTPRINT_CM),
            depth: metres(rng, Obstacle::FOOTPRINT_CM),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::obstacles::generate_obstacles;

    #[test]
    fn obstacle_sizes_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let obstacles = generate_obstacles(&mut rng);
            assert!((4..8).contains(&obstacles.len()));
            for o in obstacles {
                assert!((0.5..1.3).contains(&o.height));
                assert!((0.3..2.2).contains(&o.width));
                assert!((0.3..2.2).contains(&o.depth));
            }
        }
    }
}
