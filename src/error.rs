use rand::rand_core;
use thiserror::Error;

/// Crate-wide Result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Crate-wide Error type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Attempted to build a key schedule from a key that is not 128, 192, or 256 bits.
    #[error("invalid key length: {len} bytes (expected 16, 24, or 32)")]
    InvalidKeyLength { len: usize },

    /// Requested a feedback unit of zero bytes or larger than the cipher block.
    #[error("invalid shift: {shift} bytes (expected 1..={blocksize})")]
    InvalidShift { shift: usize, blocksize: usize },

    /// CTR mode was initialised with a counter whose length is not one block.
    #[error("invalid counter length: {len} bytes (expected {expected})")]
    InvalidCounterLength { len: usize, expected: usize },

    /// Decrypted final block did not carry a valid PKCS#7 trailer.
    #[error("invalid padding: {context}")]
    InvalidPadding { context: &'static str },

    /// OS RNG failed during random key or IV generation.
    #[error("OS RNG failed in random key or IV generation")]
    Rng(#[from] rand_core::OsError),
}
