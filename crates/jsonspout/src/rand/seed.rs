use core::{fmt, str::FromStr};

use crate::{Error, Result};

/// The seed every stream starts from unless configured otherwise.
pub const DEFAULT_SEED: u64 = 0;

/// How the per-stream sequence is seeded.
///
/// A [`Seed::Fixed`] value makes every stream replay the same bytes. A
/// [`Seed::Random`] value is resolved once, usually at process start, so all
/// streams of that process still agree with each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seed {
    Fixed(u64),
    Random,
}

impl Seed {
    /// Turns the seed into a concrete value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RandomSeedUnavailable`] for [`Seed::Random`] when the
    /// `thread-seed` feature is disabled.
    pub fn resolve(self) -> Result<u64> {
        match self {
            Self::Fixed(seed) => Ok(seed),
            #[cfg(feature = "thread-seed")]
            Self::Random => Ok(crate::rand::ThreadRandom.next_seed()),
            #[cfg(not(feature = "thread-seed"))]
            Self::Random => Err(Error::RandomSeedUnavailable),
        }
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self::Fixed(DEFAULT_SEED)
    }
}

impl FromStr for Seed {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("random") {
            return Ok(Self::Random);
        }
        trimmed
            .parse::<u64>()
            .map(Self::Fixed)
            .map_err(|_| Error::InvalidSeed {
                input: s.to_owned(),
            })
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(seed) => write!(f, "{seed}"),
            Self::Random => f.write_str("random"),
        }
    }
}
