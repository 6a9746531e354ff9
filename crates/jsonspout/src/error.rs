//! Error types for `jsonspout`.
//!
//! Generation, serialization and chunk splitting are total: every random
//! draw maps to some value and every value has a byte rendering. The only
//! fallible surface is turning user input into a [`Seed`].
//!
//! [`Seed`]: crate::rand::Seed

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors `jsonspout` can produce.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The seed was neither an unsigned 64-bit integer nor `random`.
    #[error("invalid seed `{input}`: expected an unsigned integer or `random`")]
    InvalidSeed { input: String },

    /// A random seed was requested but the `thread-seed` feature is disabled.
    #[error("random seeds require the `thread-seed` feature")]
    RandomSeedUnavailable,
}
