//! Session RNG resource.
//!
//! Grass placement draws from `GardenRng` so every viewing session gets its
//! own field, while tests and benchmarks can pin the seed. Obstacles do not
//! use it: they are seeded from `GardenConfig::layout_seed` on every build.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seed used when no explicit seed is provided.
const DEFAULT_SEED: u64 = 42;

/// Systems that need randomness take `ResMut<GardenRng>` and use `rng.0`.
#[derive(Resource)]
pub struct GardenRng(pub ChaCha8Rng);

impl Default for GardenRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(DEFAULT_SEED))
    }
}

impl GardenRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}
