//! Buffered streaming engine: wraps a block cipher and a chaining mode
//! behind an incremental `update`/`do_final` contract, owning the
//! partial-unit accumulation buffer and the mode's register lifecycle.

use crate::block::BlockCipher;
use crate::error::{Error, Result};
use crate::mode::{ChainingMode, Direction};
use crate::padding::Padding;

/// Streaming interface over a block cipher and a chaining mode.
///
/// One engine serves one logical stream at a time: feed arbitrary-length
/// chunks through [`update`](Self::update), then close the stream with
/// exactly one [`do_final`](Self::do_final), after which the engine is
/// reset and may be `init`-ed again (e.g. to switch direction over the
/// same key material). Without a padding strategy, a message that is not a
/// multiple of the unit size is only well-defined for the keystream modes
/// (CFB/OFB/CTR).
///
/// ## Examples
/// ```
/// # fn main() -> cipherbuf::Result<()> {
/// use cipherbuf::{Aes, BufferedBlockCipher, CbcMode, Direction, Pkcs7Padding};
///
/// let key = [0x42u8; 16];
/// let iv = [0x24u8; 16];
/// let msg = b"arbitrary-length message";
///
/// let mut engine = BufferedBlockCipher::new(Box::new(Aes::new()), Box::new(CbcMode::new()));
/// engine.set_padding(Box::new(Pkcs7Padding::new(16)));
///
/// engine.init(Direction::Encrypt, &key, &iv)?;
/// let ciphertext = engine.do_final_with(msg)?;
///
/// engine.init(Direction::Decrypt, &key, &iv)?;
/// assert_eq!(engine.do_final_with(&ciphertext)?, msg);
/// # Ok(())
/// # }
/// ```
pub struct BufferedBlockCipher {
    direction: Direction,
    cipher: Box<dyn BlockCipher>,
    mode: Box<dyn ChainingMode>,
    padding: Option<Box<dyn Padding>>,
    buffer: Vec<u8>,
    offset: usize,
    blocksize: usize,
    shift: usize,
}

impl BufferedBlockCipher {
    pub fn new(cipher: Box<dyn BlockCipher>, mode: Box<dyn ChainingMode>) -> Self {
        let blocksize = cipher.block_size();
        Self {
            direction: Direction::Encrypt,
            cipher,
            mode,
            padding: None,
            buffer: vec![0u8; blocksize],
            offset: 0,
            blocksize,
            shift: blocksize,
        }
    }

    /// "MODE/CIPHER", e.g. "CBC/AES-128".
    pub fn name(&self) -> String {
        format!("{}/{}", self.mode.name(), self.cipher.name())
    }

    pub fn block_size(&self) -> usize {
        self.blocksize
    }

    /// Builds the cipher's key schedule, resets the accumulation buffer and
    /// the feedback unit to one block, and hands the IV to the mode.
    pub fn init(&mut self, direction: Direction, key: &[u8], iv: &[u8]) -> Result<()> {
        self.direction = direction;
        self.cipher.init(key)?;

        self.blocksize = self.cipher.block_size();
        self.shift = self.blocksize;
        self.buffer = vec![0u8; self.shift];
        self.offset = 0;

        self.mode.init(self.blocksize, iv)
    }

    /// Shrinks the feedback unit for the short-feedback CFB/OFB variants.
    pub fn set_shift(&mut self, shift: usize) -> Result<()> {
        if shift == 0 || shift > self.blocksize {
            return Err(Error::InvalidShift {
                shift,
                blocksize: self.blocksize,
            });
        }

        self.shift = shift;
        self.buffer = vec![0u8; shift];
        self.offset = 0;
        Ok(())
    }

    /// Installs a padding strategy, applied at `do_final`.
    pub fn set_padding(&mut self, padding: Box<dyn Padding>) {
        self.padding = Some(padding);
    }

    /// Feeds a chunk of input and returns every complete unit produced;
    /// empty when the input only grew the partial unit.
    ///
    /// When decrypting with padding, the engine always retains the last
    /// full unit seen: it may carry the padding and cannot be emitted until
    /// `do_final` decides.
    pub fn update(&mut self, msg: &[u8]) -> Vec<u8> {
        if msg.is_empty() {
            return Vec::new();
        }

        let withhold = self.withholds_last_unit();
        let mut dst = Vec::with_capacity(self.update_capacity(msg.len()));
        let mut pos = 0;
        let mut length = msg.len();

        // a unit withheld by a previous call; new input proves it is not
        // the final one
        if self.offset == self.shift {
            self.flush_buffer(&mut dst);
        }

        if self.offset > 0 {
            let gap = length.min(self.shift - self.offset);
            self.buffer[self.offset..self.offset + gap].copy_from_slice(&msg[..gap]);
            self.offset += gap;
            pos += gap;
            length -= gap;

            if self.offset == self.shift && !(withhold && length == 0) {
                self.flush_buffer(&mut dst);
            }
        }

        while length >= self.shift {
            if withhold && length == self.shift {
                break;
            }

            let start = dst.len();
            dst.resize(start + self.shift, 0);
            self.mode.update_block(
                &*self.cipher,
                self.direction,
                &msg[pos..pos + self.shift],
                &mut dst[start..],
            );

            pos += self.shift;
            length -= self.shift;
        }

        if length > 0 {
            self.buffer[self.offset..self.offset + length].copy_from_slice(&msg[pos..]);
            self.offset += length;
        }

        dst
    }

    /// `update(msg)` followed by `do_final()`, outputs concatenated.
    pub fn do_final_with(&mut self, msg: &[u8]) -> Result<Vec<u8>> {
        let mut head = self.update(msg);
        let tail = self.do_final()?;

        head.extend_from_slice(&tail);
        Ok(head)
    }

    /// Flushes the final (partial) unit, padding or unpadding when a
    /// strategy is installed, then resets buffer and register so the
    /// engine is immediately reusable. Reset happens even when unpadding
    /// fails, so a later `init` starts clean.
    pub fn do_final(&mut self) -> Result<Vec<u8>> {
        let out = match self.padding.take() {
            None => Ok(self.do_final_without_padding()),
            Some(padding) => {
                let result = self.do_final_with_padding(&*padding);
                self.padding = Some(padding);
                result
            }
        };

        self.reset();
        out
    }

    fn do_final_without_padding(&mut self) -> Vec<u8> {
        if self.offset == 0 {
            return Vec::new();
        }

        // The held bytes are transformed as a whole unit and the output
        // truncated to the held count. Keystream modes make this exact;
        // for ECB/CBC a non-multiple message violates the contract and the
        // truncated block is meaningless.
        let mut tail = vec![0u8; self.shift];
        self.mode
            .update_block(&*self.cipher, self.direction, &self.buffer, &mut tail);
        tail.truncate(self.offset);
        tail
    }

    fn do_final_with_padding(&mut self, padding: &dyn Padding) -> Result<Vec<u8>> {
        match self.direction {
            Direction::Encrypt => {
                let padded = padding.pad(&self.buffer, self.offset);
                let mut dst = vec![0u8; padded.len()];

                let mut pos = 0;
                while pos + self.shift <= padded.len() {
                    let (src, out) = (&padded[pos..pos + self.shift], &mut dst[pos..]);
                    self.mode.update_block(&*self.cipher, self.direction, src, out);
                    pos += self.shift;
                }

                Ok(dst)
            }
            Direction::Decrypt => {
                let mut padded = vec![0u8; self.blocksize];
                self.mode
                    .update_block(&*self.cipher, self.direction, &self.buffer, &mut padded);
                padding.unpad(&padded)
            }
        }
    }

    fn flush_buffer(&mut self, dst: &mut Vec<u8>) {
        let start = dst.len();
        dst.resize(start + self.shift, 0);
        self.mode
            .update_block(&*self.cipher, self.direction, &self.buffer, &mut dst[start..]);
        self.offset = 0;
    }

    fn withholds_last_unit(&self) -> bool {
        self.padding.is_some() && self.direction == Direction::Decrypt
    }

    fn update_capacity(&self, length: usize) -> usize {
        let count = length + self.offset;

        if count < self.shift {
            0
        } else if self.withholds_last_unit() {
            count - self.shift
        } else {
            count - (count % self.shift)
        }
    }

    fn reset(&mut self) {
        self.offset = 0;
        self.buffer.fill(0);

        self.mode.restore_to_initial_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Aes;
    use crate::mode::{CbcMode, CtrMode, EcbMode};
    use crate::padding::Pkcs7Padding;

    fn engine(mode: Box<dyn ChainingMode>) -> BufferedBlockCipher {
        BufferedBlockCipher::new(Box::new(Aes::new()), mode)
    }

    #[test]
    fn update_buffers_until_a_unit_completes() -> Result<()> {
        let mut bbc = engine(Box::new(EcbMode::new()));
        bbc.init(Direction::Encrypt, &[0u8; 16], &[])?;

        assert!(bbc.update(&[0u8; 7]).is_empty());
        assert!(bbc.update(&[0u8; 8]).is_empty());
        assert_eq!(bbc.update(&[0u8; 1]).len(), 16);
        Ok(())
    }

    #[test]
    fn update_emits_whole_units_only() -> Result<()> {
        let mut bbc = engine(Box::new(CtrMode::new()));
        bbc.init(Direction::Encrypt, &[0u8; 16], &[0u8; 16])?;

        assert_eq!(bbc.update(&[0u8; 40]).len(), 32);
        assert_eq!(bbc.update(&[0u8; 8]).len(), 16);
        Ok(())
    }

    #[test]
    fn decrypt_with_padding_withholds_final_unit() -> Result<()> {
        let mut bbc = engine(Box::new(CbcMode::new()));
        bbc.set_padding(Box::new(Pkcs7Padding::new(16)));

        let key = [7u8; 16];
        let iv = [9u8; 16];

        bbc.init(Direction::Encrypt, &key, &iv)?;
        let ct = bbc.do_final_with(&[0x5a; 32])?;
        assert_eq!(ct.len(), 48);

        bbc.init(Direction::Decrypt, &key, &iv)?;
        // the last full unit must stay buffered until do_final
        let pt = bbc.update(&ct);
        assert_eq!(pt, vec![0x5a; 32]);
        // the withheld unit was all padding
        assert!(bbc.do_final()?.is_empty());
        Ok(())
    }

    #[test]
    fn invalid_shift_is_rejected() -> Result<()> {
        let mut bbc = engine(Box::new(EcbMode::new()));
        bbc.init(Direction::Encrypt, &[0u8; 16], &[])?;

        assert!(matches!(
            bbc.set_shift(17),
            Err(Error::InvalidShift {
                shift: 17,
                blocksize: 16
            })
        ));
        assert!(bbc.set_shift(0).is_err());
        assert!(bbc.set_shift(16).is_ok());
        Ok(())
    }

    #[test]
    fn failed_unpad_leaves_engine_reusable() -> Result<()> {
        let key = [1u8; 16];
        let iv = [2u8; 16];

        // a final block whose trailer claims zero padding can never unpad
        let mut bogus_tail = [0x41u8; 16];
        bogus_tail[15] = 0x00;

        let mut plain = engine(Box::new(CbcMode::new()));
        plain.init(Direction::Encrypt, &key, &iv)?;
        let bad_ct = plain.do_final_with(&bogus_tail)?;

        let mut bbc = engine(Box::new(CbcMode::new()));
        bbc.set_padding(Box::new(Pkcs7Padding::new(16)));

        bbc.init(Direction::Decrypt, &key, &iv)?;
        bbc.update(&bad_ct);
        assert!(matches!(
            bbc.do_final(),
            Err(Error::InvalidPadding { .. })
        ));

        // engine must come back clean after the failure
        bbc.init(Direction::Encrypt, &key, &iv)?;
        let good_ct = bbc.do_final_with(b"attack at dawn")?;
        bbc.init(Direction::Decrypt, &key, &iv)?;
        assert_eq!(bbc.do_final_with(&good_ct)?, b"attack at dawn");
        Ok(())
    }

    #[test]
    fn name_combines_mode_and_cipher() -> Result<()> {
        let mut bbc = engine(Box::new(CbcMode::new()));
        bbc.init(Direction::Encrypt, &[0u8; 32], &[0u8; 16])?;
        assert_eq!(bbc.name(), "CBC/AES-256");
        Ok(())
    }
}
