/// A source of uniformly distributed 32-bit words, plus the sampling
/// routines every random decision in `jsonspout` is built from.
///
/// Only [`next_u32`] is required. The provided methods fix *how* raw words
/// become bounded integers, floats and slice picks, and they must not be
/// overridden by sources that participate in a reproducible stream: the
/// exact number of words consumed per decision is part of the determinism
/// contract.
///
/// This abstraction allows you to plug in the seeded [`MersenneTwister`] or a
/// scripted source in tests.
///
/// # Example
/// ```
/// use jsonspout::RandSource;
///
/// struct Zeroes;
/// impl RandSource for Zeroes {
///     fn next_u32(&mut self) -> u32 {
///         0
///     }
/// }
///
/// let mut rng = Zeroes;
/// assert_eq!(rng.range_inclusive(3, 9), 3);
/// assert_eq!(*rng.choose(&["a", "b"]), "a");
/// ```
///
/// [`next_u32`]: RandSource::next_u32
/// [`MersenneTwister`]: crate::rand::MersenneTwister
pub trait RandSource {
    /// Returns the next raw 32-bit output of the sequence.
    fn next_u32(&mut self) -> u32;

    /// Returns an integer made of the top `k` bits of one raw word.
    ///
    /// `k` must be in `1..=32`.
    fn getrandbits(&mut self, k: u32) -> u32 {
        debug_assert!((1..=32).contains(&k), "getrandbits({k}) out of range");
        self.next_u32() >> (32 - k)
    }

    /// Returns a uniform integer in `[0, n)` by rejection sampling on the
    /// bit length of `n`.
    ///
    /// `below(0)` returns `0` without consuming any words.
    fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        let k = u32::BITS - n.leading_zeros();
        loop {
            let r = self.getrandbits(k);
            if r < n {
                return r;
            }
        }
    }

    /// Returns a uniform integer in `[lo, hi]`.
    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        debug_assert!(lo <= hi, "empty range {lo}..={hi}");
        lo + self.below(hi - lo + 1)
    }

    /// Returns a float in `[0, 1)` with 53 bits of precision, built from two
    /// raw words.
    fn random(&mut self) -> f64 {
        let a = self.next_u32() >> 5;
        let b = self.next_u32() >> 6;
        (f64::from(a) * 67_108_864.0 + f64::from(b)) * (1.0 / 9_007_199_254_740_992.0)
    }

    /// Picks one element of `items` uniformly.
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let len = u32::try_from(items.len()).unwrap_or(u32::MAX);
        &items[self.below(len) as usize]
    }
}

impl<R: RandSource + ?Sized> RandSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}
