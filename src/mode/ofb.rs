use crate::block::BlockCipher;
use crate::error::Result;
use crate::mode::{ChainingMode, Direction};

/// Output feedback: the register is repeatedly encrypted to form a
/// keystream which is XORed with the input. The register feeds back the
/// keystream itself, never the ciphertext, so the keystream only depends on
/// the key and IV and both directions are the same operation.
pub struct OfbMode {
    initial_iv: Vec<u8>,
    working_iv: Vec<u8>,
    keystream: Vec<u8>,
}

impl OfbMode {
    pub fn new() -> Self {
        Self {
            initial_iv: Vec::new(),
            working_iv: Vec::new(),
            keystream: Vec::new(),
        }
    }
}

impl Default for OfbMode {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainingMode for OfbMode {
    fn name(&self) -> &'static str {
        "OFB"
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
        _direction: Direction,
        src: &[u8],
        dst: &mut [u8],
    ) {
        cipher.encrypt_block(&self.working_iv, &mut self.keystream);
        for i in 0..src.len() {
            dst[i] = src[i] ^ self.keystream[i];
        }

        self.working_iv.copy_from_slice(&self.keystream);
    }
}
