//! Deterministic jitter generator owned by each network.
//!
//! Tile networks scatter the single point they emit per tile inside the tile
//! footprint so that several agents on the same route do not render on top
//! of each other.  The generator is seeded from `FleetConfig::seed` and only
//! advanced inside path-geometry requests, so a replay with the same seed
//! and the same sequence of topology events produces identical paths.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-network deterministic RNG.
pub struct JitterRng(SmallRng);

impl JitterRng {
    pub fn new(seed: u64) -> Self {
        JitterRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from a global seed and a per-network salt so that road and water
    /// networks built from the same config do not produce identical offsets.
    pub fn salted(seed: u64, salt: u64) -> Self {
        Self::new(seed ^ salt.wrapping_mul(MIXING_CONSTANT))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Uniform value in `[-max, max]`.  Returns `0.0` for non-positive `max`.
    #[inline]
    pub fn symmetric(&mut self, max: f32) -> f32 {
        if max <= 0.0 {
            return 0.0;
        }
        self.0.gen_range(-max..=max)
    }

    /// A ground-plane offset with both components in `[-max, max]`.
    #[inline]
    pub fn planar_offset(&mut self, max: f32) -> (f32, f32) {
        (self.symmetric(max), self.symmetric(max))
    }
}

impl std::fmt::Debug for JitterRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("JitterRng")
    }
}
