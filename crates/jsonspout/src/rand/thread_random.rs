use crate::rand::RandSource;
use rand::{Rng, rng};

/// A `RandSource` backed by the thread-local RNG (`rand::rng()`).
///
/// Output is *not* reproducible. Use it to pick a fresh seed, or to drive
/// the generator directly when throughput matters more than replayability
/// (benchmarks, ad-hoc fuzzing).
///
/// This type does **not** store the RNG itself; it accesses the thread-local
/// generator on each call, so it is a zero-sized, `Send` handle.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl ThreadRandom {
    /// Draws a fresh 64-bit seed.
    pub fn next_seed(self) -> u64 {
        rng().random()
    }
}

impl RandSource for ThreadRandom {
    fn next_u32(&mut self) -> u32 {
        rng().random()
    }
}
