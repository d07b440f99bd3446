use crate::block::BlockCipher;
use crate::error::Result;
use crate::mode::{ChainingMode, Direction};

/// Electronic codebook: every block is transformed independently, with no
/// feedback register and no use for an IV. Identical plaintext blocks
/// produce identical ciphertext blocks.
pub struct EcbMode;

impl EcbMode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EcbMode {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainingMode for EcbMode {
    fn name(&self) -> &'static str {
        "ECB"
    }

    fn init(&mut self, _blocksize: usize, _iv: &[u8]) -> Result<()> {
        Ok(())
    }

    fn restore_to_initial_state(&mut self) {}

    fn update_block(
        &mut self,
        cipher: &dyn BlockCipher,
        direction: Direction,
        src: &[u8],
        dst: &mut [u8],
    ) {
        match direction {
            Direction::Encrypt => cipher.encrypt_block(src, dst),
            Direction::Decrypt => cipher.decrypt_block(src, dst),
        }
    }
}
