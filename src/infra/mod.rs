//! Инфраструктура вокруг движка: реализации `RandomSource` и seed-ы.

pub mod rng;
pub mod rng_seed;

pub use rng::{DeterministicRng, SystemRng};
pub use rng_seed::RngSeed;
