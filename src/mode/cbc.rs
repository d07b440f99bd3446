use crate::block::BlockCipher;
use crate::error::Result;
use crate::mode::{ChainingMode, Direction};
use crate::util::xor_into;

/// Cipher block chaining: the working IV always holds the previous
/// ciphertext block, XORed into the plaintext before encryption and into
/// the decrypted block after.
pub struct CbcMode {
    initial_iv: Vec<u8>,
    working_iv: Vec<u8>,
    xorbuffer: Vec<u8>,
}

impl CbcMode {
    pub fn new() -> Self {
        Self {
            initial_iv: Vec::new(),
            working_iv: Vec::new(),
            xorbuffer: Vec::new(),
        }
    }
}

impl Default for CbcMode {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainingMode for CbcMode {
    fn name(&self) -> &'static str {
        "CBC"
    }

    fn init(&mut self, blocksize: usize, iv: &[u8]) -> Result<()> {
        self.initial_iv = vec![0u8; blocksize];
        self.working_iv = vec![0u8; blocksize];
        self.xorbuffer = vec![0u8; blocksize];

        let n = iv.len().min(blocksize);
        self.initial_iv[..n].copy_from_slice(&iv[..n]);
        self.working_iv[..n].copy_from_slice(&iv[..n]);
        Ok(())
    }

    fn restore_to_initial_state(&mut self) {
        self.xorbuffer.fill(0);
        self.working_iv.copy_from_slice(&self.initial_iv);
    }

    fn update_block(
        &mut self,
        cipher: &dyn BlockCipher,
        direction: Direction,
        src: &[u8],
        dst: &mut [u8],
    ) {
        let blocksize = self.working_iv.len();

        match direction {
            Direction::Encrypt => {
                xor_into(&mut self.xorbuffer, &self.working_iv, src, blocksize);
                cipher.encrypt_block(&self.xorbuffer, &mut self.working_iv);
                dst[..blocksize].copy_from_slice(&self.working_iv);
            }
            Direction::Decrypt => {
                cipher.decrypt_block(src, &mut self.xorbuffer);
                xor_into(dst, &self.xorbuffer, &self.working_iv, blocksize);
                self.working_iv.copy_from_slice(&src[..blocksize]);
            }
        }
    }
}
