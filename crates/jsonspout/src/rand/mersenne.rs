use crate::rand::RandSource;

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// The 32-bit Mersenne Twister (MT19937), seeded through `init_by_array`.
///
/// This is the sequence every stream draws from. Seeding a `u64` splits it
/// into little-endian 32-bit key words (one word below `2^32`, two above),
/// which makes the output word-for-word identical to other MT19937 ports
/// that seed the same way. Given the same seed, the full byte stream built
/// on top of it is identical across runs and across implementations.
///
/// Each stream owns its own instance; the type is deliberately not `Copy`
/// and has no shared or global state.
///
/// # Example
/// ```
/// use jsonspout::{MersenneTwister, RandSource};
///
/// let mut rng = MersenneTwister::from_seed(0);
/// assert_eq!(rng.next_u32(), 3_626_764_237);
/// ```
#[derive(Clone)]
pub struct MersenneTwister {
    state: Box<[u32; N]>,
    index: usize,
}

impl MersenneTwister {
    /// Creates a generator seeded from a 64-bit integer.
    pub fn from_seed(seed: u64) -> Self {
        let low = seed as u32;
        let high = (seed >> 32) as u32;
        if high == 0 {
            Self::from_key(&[low])
        } else {
            Self::from_key(&[low, high])
        }
    }

    /// Creates a generator seeded from an arbitrary key, as the reference
    /// `init_by_array` does. An empty key is treated as `[0]`.
    pub fn from_key(key: &[u32]) -> Self {
        let key = if key.is_empty() { &[0][..] } else { key };
        let mut mt = Self::from_word(19_650_218);
        let state = &mut mt.state;

        let mut i = 1;
        let mut j = 0;
        for _ in 0..N.max(key.len()) {
            let prev = state[i - 1] ^ (state[i - 1] >> 30);
            state[i] = (state[i] ^ prev.wrapping_mul(1_664_525))
                .wrapping_add(key[j])
                .wrapping_add(j as u32);
            i += 1;
            j += 1;
            if i >= N {
                state[0] = state[N - 1];
                i = 1;
            }
            if j >= key.len() {
                j = 0;
            }
        }
        for _ in 0..N - 1 {
            let prev = state[i - 1] ^ (state[i - 1] >> 30);
            state[i] = (state[i] ^ prev.wrapping_mul(1_566_083_941)).wrapping_sub(i as u32);
            i += 1;
            if i >= N {
                state[0] = state[N - 1];
                i = 1;
            }
        }
        // MSB is 1, assuring a non-zero initial array
        state[0] = UPPER_MASK;
        mt
    }

    /// Creates a generator with the single-word `init_genrand` seeding.
    pub fn from_word(seed: u32) -> Self {
        let mut state = Box::new([0u32; N]);
        state[0] = seed;
        for i in 1..N {
            let prev = state[i - 1] ^ (state[i - 1] >> 30);
            state[i] = prev.wrapping_mul(1_812_433_253).wrapping_add(i as u32);
        }
        Self { state, index: N }
    }

    fn twist(&mut self) {
        let state = &mut self.state;
        for kk in 0..N {
            let y = (state[kk] & UPPER_MASK) | (state[(kk + 1) % N] & LOWER_MASK);
            let mut next = state[(kk + M) % N] ^ (y >> 1);
            if y & 1 != 0 {
                next ^= MATRIX_A;
            }
            state[kk] = next;
        }
        self.index = 0;
    }
}

impl RandSource for MersenneTwister {
    fn next_u32(&mut self) -> u32 {
        if self.index >= N {
            self.twist();
        }
        let mut y = self.state[self.index];
        self.index += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^= y >> 18;
        y
    }
}

impl core::fmt::Debug for MersenneTwister {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MersenneTwister")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}
