//! Deterministic RNG utilities for reproducible tests.

use std::ops::RangeInclusive;

use delta_core::JointAngles;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Create a deterministic `ChaCha8Rng` from a seed.
///
/// All test randomization should go through this to ensure reproducibility.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Generate `count` deterministic joint-angle triples, each angle drawn
/// uniformly from `range` (degrees).
pub fn random_joint_angles(count: usize, range: RangeInclusive<f64>, seed: u64) -> Vec<JointAngles> {
    use rand::Rng;
    let mut rng = seeded_rng(seed);
    (0..count)
        .map(|_| {
            JointAngles::new(
                rng.gen_range(range.clone()),
                rng.gen_range(range.clone()),
                rng.gen_range(range.clone()),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
