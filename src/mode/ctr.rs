use crate::block::BlockCipher;
use crate::error::{Error, Result};
use crate::mode::{ChainingMode, Direction};

/// Counter mode: the register is a big-endian counter encrypted to form the
/// keystream, incremented once per unit. Both directions are the same
/// XOR-with-keystream operation.
pub struct CtrMode {
    initial_counter: Vec<u8>,
    working_counter: Vec<u8>,
    keystream: Vec<u8>,
}

impl CtrMode {
    pub fn new() -> Self {
        Self {
            initial_counter: Vec::new(),
            working_counter: Vec::new(),
            keystream: Vec::new(),
        }
    }

    /// Byte-wise increment with the carry running from the last byte toward
    /// the first; incrementing an all-0xff counter wraps to all-zero.
    fn increase_counter(&mut self) {
        for byte in self.working_counter.iter_mut().rev() {
            *byte = byte.wrapping_add(1);
            if *byte != 0 {
                break;
            }
        }
    }
}

impl Default for CtrMode {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainingMode for CtrMode {
    fn name(&self) -> &'static str {
        "CTR"
    }

    fn init(&mut self, blocksize: usize, iv: &[u8]) -> Result<()> {
        if iv.len() != blocksize {
            return Err(Error::InvalidCounterLength {
                len: iv.len(),
                expected: blocksize,
            });
        }

        self.initial_counter = iv.to_vec();
        self.working_counter = iv.to_vec();
        self.keystream = vec![0u8; blocksize];
        Ok(())
    }

    fn restore_to_initial_state(&mut self) {
        self.working_counter.copy_from_slice(&self.initial_counter);
        self.keystream.fill(0);
    }

    fn update_block(
        &mut self,
        cipher: &dyn BlockCipher,
        _direction: Direction,
        src: &[u8],
        dst: &mut [u8],
    ) {
        cipher.encrypt_block(&self.working_counter, &mut self.keystream);
        for i in 0..src.len() {
            dst[i] = src[i] ^ self.keystream[i];
        }

        self.increase_counter();
    }
}
