use tracing::debug;

use crate::estimate::Estimate;
use crate::sampler::SampleGenerator;

/// Single-threaded estimate over `samples` points. Timing is left to the caller.
pub fn estimate(samples: u64, generator: &mut SampleGenerator) -> Estimate {
    debug!(samples, "sequential run started");
    let inside = generator.count_inside(samples);
    Estimate { samples, inside }
}
