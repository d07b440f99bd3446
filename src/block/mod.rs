//! Block-cipher capability and its AES implementation.

mod aes;
mod constants;

pub use aes::Aes;

use crate::error::Result;

/// A fixed-size keyed permutation.
///
/// `src` and `dst` are each exactly one block. Implementations copy the
/// input into their own scratch space and copy the result out; caller
/// buffers are never retained across calls.
pub trait BlockCipher {
    /// Algorithm name, e.g. "AES-128".
    fn name(&self) -> String;

    /// Block length in bytes.
    fn block_size(&self) -> usize;

    /// Key length in bytes for the current schedule.
    fn key_size(&self) -> usize;

    /// Builds the round-key schedule for `key`.
    fn init(&mut self, key: &[u8]) -> Result<()>;

    /// Encrypts one block from `src` into `dst`.
    fn encrypt_block(&self, src: &[u8], dst: &mut [u8]);

    /// Decrypts one block from `src` into `dst`.
    fn decrypt_block(&self, src: &[u8], dst: &mut [u8]);
}
