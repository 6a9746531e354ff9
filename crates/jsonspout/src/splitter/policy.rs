use crate::rand::RandSource;

/// Largest chunk the splitter ever hands out.
pub const MAX_CHUNK_SIZE: usize = 1024;

/// Adversarial sizes: empty, a single byte, a UTF-8 sequence width, and the
/// maximum.
pub const BOUNDARY_SIZES: [usize; 4] = [0, 1, 4, MAX_CHUNK_SIZE];

/// Draws the next chunk size.
///
/// Half of the draws pick from [`BOUNDARY_SIZES`], the other half are
/// uniform over `0..=MAX_CHUNK_SIZE`. Both tiers stay: the boundary tier is
/// what puts heavy mass on empty and one-byte reads.
pub fn chunk_size<R: RandSource>(rng: &mut R) -> usize {
    if rng.range_inclusive(0, 1) == 0 {
        *rng.choose(&BOUNDARY_SIZES)
    } else {
        rng.range_inclusive(0, MAX_CHUNK_SIZE as u32) as usize
    }
}
