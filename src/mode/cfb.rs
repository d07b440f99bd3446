use crate::block::BlockCipher;
use crate::error::Result;
use crate::mode::{ChainingMode, Direction};

/// Cipher feedback: each unit XORs the input with the leading bytes of the
/// encrypted register, then slides the register left by one unit and feeds
/// the ciphertext into its tail. Both directions feed back ciphertext, so
/// decryption also runs the cipher forward.
///
/// Supports feedback units smaller than the block (CFB-8, CFB-64, ...) via
/// the engine's shift.
pub struct CfbMode {
    initial_iv: Vec<u8>,
    working_iv: Vec<u8>,
    keystream: Vec<u8>,
}

impl CfbMode {
    pub fn new() -> Self {
        Self {
            initial_iv: Vec::new(),
            working_iv: Vec::new(),
            keystream: Vec::new(),
        }
    }
}

impl Default for CfbMode {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainingMode for CfbMode {
    fn name(&self) -> &'static str {
        "CFB"
    }

    fn init(&mut self, blocksize: usize, iv: &[u8]) -> Result<()> {
        self.initial_iv = vec![0u8; blocksize];
        self.working_iv = vec![0u8; blocksize];
        self.keystream = vec![0u8; blocksize];

        let n = iv.len().min(blocksize);
        self.initial_iv[..n].copy_from_slice(&iv[..n]);
        self.working_iv[..n].copy_from_slice(&iv[..n]);
        Ok(())
    }

    fn restore_to_initial_state(&mut self) {
        self.working_iv.copy_from_slice(&self.initial_iv);
        self.keystream.fill(0);
    }

    fn update_block(
        &mut self,
        cipher: &dyn BlockCipher,
        direction: Direction,
        src: &[u8],
        dst: &mut [u8],
    ) {
        let blocksize = self.working_iv.len();
        let shift = src.len();

        cipher.encrypt_block(&self.working_iv, &mut self.keystream);
        for i in 0..shift {
            dst[i] = src[i] ^ self.keystream[i];
        }

        // slide the register left by one unit, ciphertext into the tail
        self.working_iv.copy_within(shift.., 0);
        match direction {
            Direction::Encrypt => {
                self.working_iv[blocksize - shift..].copy_from_slice(&dst[..shift]);
            }
            Direction::Decrypt => {
                self.working_iv[blocksize - shift..].copy_from_slice(&src[..shift]);
            }
        }
    }
}
