use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const SEED_SPREAD: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

/// True when the point lies inside (or on) the unit circle.
pub fn is_inside(x: f64, y: f64) -> bool {
    x * x + y * y <= 1.0
}

/// Seed taken from the wall clock. A clock set before the epoch yields 0.
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Derives the seed of one worker from the run's base seed.
pub fn worker_seed(base: u64, worker_id: usize) -> u64 {
    base.wrapping_add((worker_id as u64 + 1).wrapping_mul(SEED_SPREAD))
}

/// Uniform point source over the unit square. Never shared between workers.
#[derive(Debug, Clone)]
pub struct SampleGenerator {
    rng: SmallRng,
}

impl SampleGenerator {
    pub fn from_seed(seed: u64) -> Self {
        SampleGenerator {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn sample(&mut self) -> Sample {
        Sample {
            x: self.rng.gen::<f64>(),
            y: self.rng.gen::<f64>(),
        }
    }

    /// Draws `samples` points and returns how many fell inside the circle.
    pub fn count_inside(&mut self, samples: u64) -> u64 {
        let mut inside = 0;
        for _ in 0..samples {
            let Sample { x, y } = self.sample();
            if is_inside(x, y) {
                inside += 1;
            }
        }
        inside
    }
}

/// One generator per worker, each handed out by value so no two workers
/// ever touch the same state.
#[derive(Debug)]
pub struct GeneratorPool {
    generators: Vec<SampleGenerator>,
}

impl GeneratorPool {
    pub fn new(base_seed: u64, workers: usize) -> Self {
        let generators = (0..workers)
            .map(|id| SampleGenerator::from_seed(worker_seed(base_seed, id)))
            .collect();
        GeneratorPool { generators }
    }
}

impl IntoIterator for GeneratorPool {
    type Item = SampleGenerator;
    type IntoIter = std::vec::IntoIter<SampleGenerator>;

    fn into_iter(self) -> Self::IntoIter {
        self.generators.into_iter()
    }
}
