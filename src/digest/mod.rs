//! Digest capability and its SHA-256 implementation. Independent of the
//! cipher engine: consumers of both hold them as unrelated siblings.

mod sha256;

pub use sha256::Sha256;

/// An incremental cryptographic hash.
pub trait Digest {
    /// Algorithm name, e.g. "SHA-256".
    fn name(&self) -> &'static str;

    /// Internal compression block length in bytes.
    fn block_size(&self) -> usize;

    /// Digest length in bytes.
    fn output_length(&self) -> usize;

    /// Clears all accumulated state.
    fn reset(&mut self);

    /// Absorbs a chunk of the message.
    fn update(&mut self, msg: &[u8]);

    /// Completes the digest and resets for the next message.
    fn do_final(&mut self) -> Vec<u8>;
}
