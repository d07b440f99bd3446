//! Padding strategies for the stream finalize step.

use crate::error::{Error, Result};

/// Reversible scheme appending deterministic trailing bytes so
/// arbitrary-length plaintext maps onto whole blocks. Pure value-to-value
/// transforms; no state beyond the block size.
pub trait Padding {
    fn name(&self) -> &'static str;

    /// Returns `buf[..len]` extended to a whole number of blocks.
    fn pad(&self, buf: &[u8], len: usize) -> Vec<u8>;

    /// Strips and validates the trailing padding of a decrypted final
    /// block.
    fn unpad(&self, block: &[u8]) -> Result<Vec<u8>>;
}

/// PKCS#7: appends `blocksize - (len % blocksize)` bytes, each holding that
/// same value. A message already a multiple of the block size gains a full
/// extra block of padding.
pub struct Pkcs7Padding {
    blocksize: usize,
}

impl Pkcs7Padding {
    pub fn new(blocksize: usize) -> Self {
        Self { blocksize }
    }
}

impl Padding for Pkcs7Padding {
    fn name(&self) -> &'static str {
        "PKCS7-Padding"
    }

    fn pad(&self, buf: &[u8], len: usize) -> Vec<u8> {
        let pad = self.blocksize - (len % self.blocksize);

        let mut out = vec![pad as u8; len + pad];
        out[..len].copy_from_slice(&buf[..len]);
        out
    }

    fn unpad(&self, block: &[u8]) -> Result<Vec<u8>> {
        let pad = match block.last() {
            Some(&last) => last as usize,
            None => {
                return Err(Error::InvalidPadding {
                    context: "empty block",
                });
            }
        };

        if pad == 0 || pad > self.blocksize || pad > block.len() {
            return Err(Error::InvalidPadding {
                context: "pad count out of range",
            });
        }

        let body = block.len() - pad;
        if !block[body..].iter().all(|&b| b as usize == pad) {
            return Err(Error::InvalidPadding {
                context: "pad bytes mismatch",
            });
        }

        Ok(block[..body].to_vec())
    }
}
