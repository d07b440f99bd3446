//! AES block transform. Key size selects the variant: 16, 24, or 32 bytes
//! for AES-128, AES-192, and AES-256.
//!
//! The working state is kept transposed (row-major) so ShiftRows reduces to
//! fixed-index byte swaps, and the middle rounds run SubBytes and
//! MixColumns together through four precomputed 32-bit tables. Decryption
//! walks the schedule backwards and re-applies forward SubBytes before the
//! inverse-table lookup (the equivalent inverse cipher).

use crate::block::BlockCipher;
use crate::block::constants::{
    ISMC0, ISMC1, ISMC2, ISMC3, RC, SBOX, SINV, SMC0, SMC1, SMC2, SMC3,
};
use crate::error::{Error, Result};

const BLOCKSIZE: usize = 16;

const AES128_ROUNDS: usize = 10;
const AES192_ROUNDS: usize = 12;
const AES256_ROUNDS: usize = 14;

pub struct Aes {
    keysize: usize,
    rounds: usize,
    rks: Vec<u8>,
}

impl Aes {
    pub fn new() -> Self {
        Self {
            keysize: 0,
            rounds: 0,
            rks: Vec::new(),
        }
    }

    fn init128(&mut self, mk: &[u8]) {
        self.rounds = AES128_ROUNDS;

        let mut rk = self.seed_words(mk);
        let mut idx = 0;
        for i in 0..10 {
            let tmp = subword(rk[idx + 3].rotate_right(8));
            rk[idx + 4] = rk[idx] ^ tmp ^ RC[i];
            rk[idx + 5] = rk[idx + 1] ^ rk[idx + 4];
            rk[idx + 6] = rk[idx + 2] ^ rk[idx + 5];
            rk[idx + 7] = rk[idx + 3] ^ rk[idx + 6];
            idx += 4;
        }

        self.write_round_keys(&rk);
    }

    fn init192(&mut self, mk: &[u8]) {
        self.rounds = AES192_ROUNDS;

        let mut rk = self.seed_words(mk);
        let mut idx = 0;
        for i in 0..8 {
            let tmp = subword(rk[idx + 5].rotate_right(8));
            rk[idx + 6] = rk[idx] ^ tmp ^ RC[i];
            rk[idx + 7] = rk[idx + 1] ^ rk[idx + 6];
            rk[idx + 8] = rk[idx + 2] ^ rk[idx + 7];
            rk[idx + 9] = rk[idx + 3] ^ rk[idx + 8];

            // the last group stops at the schedule boundary
            if i == 7 {
                break;
            }

            rk[idx + 10] = rk[idx + 4] ^ rk[idx + 9];
            rk[idx + 11] = rk[idx + 5] ^ rk[idx + 10];
            idx += 6;
        }

        self.write_round_keys(&rk);
    }

    fn init256(&mut self, mk: &[u8]) {
        self.rounds = AES256_ROUNDS;

        let mut rk = self.seed_words(mk);
        let mut idx = 0;
        for i in 0..7 {
            let tmp = subword(rk[idx + 7].rotate_right(8));
            rk[idx + 8] = rk[idx] ^ tmp ^ RC[i];
            rk[idx + 9] = rk[idx + 1] ^ rk[idx + 8];
            rk[idx + 10] = rk[idx + 2] ^ rk[idx + 9];
            rk[idx + 11] = rk[idx + 3] ^ rk[idx + 10];

            if i == 6 {
                break;
            }

            // every second group substitutes without rotating
            rk[idx + 12] = rk[idx + 4] ^ subword(rk[idx + 11]);
            rk[idx + 13] = rk[idx + 5] ^ rk[idx + 12];
            rk[idx + 14] = rk[idx + 6] ^ rk[idx + 13];
            rk[idx + 15] = rk[idx + 7] ^ rk[idx + 14];
            idx += 8;
        }

        self.write_round_keys(&rk);
    }

    /// Schedule-sized word array with the master key in the leading words,
    /// little-endian.
    fn seed_words(&self, mk: &[u8]) -> Vec<u32> {
        let mut rk = vec![0u32; (self.rounds + 1) * 4];
        for (i, chunk) in mk.chunks_exact(4).enumerate() {
            rk[i] = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        rk
    }

    fn write_round_keys(&mut self, rk: &[u32]) {
        self.rks.clear();
        self.rks.reserve(rk.len() * 4);
        for word in rk {
            self.rks.extend_from_slice(&word.to_le_bytes());
        }
    }

    /// XORs one round key into the transposed state. The schedule is
    /// column-major, the state row-major, hence the crossed indexing.
    fn add_round_key(&self, block: &mut [u8; BLOCKSIZE], ridx: usize) {
        let rk = &self.rks[ridx..ridx + BLOCKSIZE];
        for row in 0..4 {
            for col in 0..4 {
                block[row * 4 + col] ^= rk[col * 4 + row];
            }
        }
    }
}

impl Default for Aes {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockCipher for Aes {
    fn name(&self) -> String {
        format!("AES-{}", self.keysize << 3)
    }

    fn block_size(&self) -> usize {
        BLOCKSIZE
    }

    fn key_size(&self) -> usize {
        self.keysize
    }

    fn init(&mut self, key: &[u8]) -> Result<()> {
        self.keysize = key.len();

        match self.keysize {
            16 => self.init128(key),
            24 => self.init192(key),
            32 => self.init256(key),
            _ => return Err(Error::InvalidKeyLength { len: key.len() }),
        }

        Ok(())
    }

    fn encrypt_block(&self, src: &[u8], dst: &mut [u8]) {
        debug_assert!(!self.rks.is_empty(), "init must run before encrypt_block");

        let mut block = [0u8; BLOCKSIZE];
        block.copy_from_slice(&src[..BLOCKSIZE]);
        transpose(&mut block);

        let mut ridx = 0;
        self.add_round_key(&mut block, ridx);

        for _ in 0..self.rounds - 1 {
            ridx += BLOCKSIZE;
            shift_rows(&mut block);
            sub_bytes_mix_columns(&mut block);
            self.add_round_key(&mut block, ridx);
        }

        sub_bytes(&mut block);
        shift_rows(&mut block);
        self.add_round_key(&mut block, ridx + BLOCKSIZE);

        transpose(&mut block);
        dst[..BLOCKSIZE].copy_from_slice(&block);
    }

    fn decrypt_block(&self, src: &[u8], dst: &mut [u8]) {
        debug_assert!(!self.rks.is_empty(), "init must run before decrypt_block");

        let mut block = [0u8; BLOCKSIZE];
        block.copy_from_slice(&src[..BLOCKSIZE]);
        transpose(&mut block);

        let mut ridx = BLOCKSIZE * self.rounds;
        self.add_round_key(&mut block, ridx);

        for _ in 0..self.rounds - 1 {
            ridx -= BLOCKSIZE;
            inv_shift_rows(&mut block);
            inv_sub_bytes(&mut block);
            self.add_round_key(&mut block, ridx);
            inv_mix_columns(&mut block);
        }

        inv_sub_bytes(&mut block);
        inv_shift_rows(&mut block);
        self.add_round_key(&mut block, 0);

        transpose(&mut block);
        dst[..BLOCKSIZE].copy_from_slice(&block);
    }
}

fn subword(value: u32) -> u32 {
    let [b0, b1, b2, b3] = value.to_le_bytes();
    u32::from_le_bytes([
        SBOX[b0 as usize],
        SBOX[b1 as usize],
        SBOX[b2 as usize],
        SBOX[b3 as usize],
    ])
}

/// Swaps the column-major wire layout with the row-major working layout.
fn transpose(block: &mut [u8; BLOCKSIZE]) {
    block.swap(1, 4);
    block.swap(2, 8);
    block.swap(3, 12);
    block.swap(6, 9);
    block.swap(7, 13);
    block.swap(11, 14);
}

fn sub_bytes(block: &mut [u8; BLOCKSIZE]) {
    for byte in block {
        *byte = SBOX[*byte as usize];
    }
}

fn inv_sub_bytes(block: &mut [u8; BLOCKSIZE]) {
    for byte in block {
        *byte = SINV[*byte as usize];
    }
}

/// Row rotations as fixed swaps on the transposed state: row 1 left by one,
/// row 2 by two, row 3 by three.
fn shift_rows(block: &mut [u8; BLOCKSIZE]) {
    let tmp = block[4];
    block[4] = block[5];
    block[5] = block[6];
    block[6] = block[7];
    block[7] = tmp;

    block.swap(8, 10);
    block.swap(9, 11);

    let tmp = block[15];
    block[15] = block[14];
    block[14] = block[13];
    block[13] = block[12];
    block[12] = tmp;
}

fn inv_shift_rows(block: &mut [u8; BLOCKSIZE]) {
    let tmp = block[7];
    block[7] = block[6];
    block[6] = block[5];
    block[5] = block[4];
    block[4] = tmp;

    block.swap(8, 10);
    block.swap(9, 11);

    let tmp = block[12];
    block[12] = block[13];
    block[13] = block[14];
    block[14] = block[15];
    block[15] = tmp;
}

/// SubBytes and MixColumns in one pass: per column, the four table entries
/// XOR into the mixed column with each input byte already substituted.
fn sub_bytes_mix_columns(block: &mut [u8; BLOCKSIZE]) {
    for i in 0..4 {
        let value = SMC0[block[i] as usize]
            ^ SMC1[block[i + 4] as usize]
            ^ SMC2[block[i + 8] as usize]
            ^ SMC3[block[i + 12] as usize];

        let [b0, b1, b2, b3] = value.to_be_bytes();
        block[i] = b0;
        block[i + 4] = b1;
        block[i + 8] = b2;
        block[i + 12] = b3;
    }
}

/// InvMixColumns by way of the combined inverse tables. The tables expect
/// substituted bytes, so forward SubBytes runs first and the tables fold
/// the inverse substitution back in.
fn inv_mix_columns(block: &mut [u8; BLOCKSIZE]) {
    sub_bytes(block);

    for i in 0..4 {
        let value = ISMC0[block[i] as usize]
            ^ ISMC1[block[i + 4] as usize]
            ^ ISMC2[block[i + 8] as usize]
            ^ ISMC3[block[i + 12] as usize];

        let [b0, b1, b2, b3] = value.to_be_bytes();
        block[i] = b0;
        block[i + 4] = b1;
        block[i + 8] = b2;
        block[i + 12] = b3;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::from_hex;

    fn last_round_key(aes: &Aes) -> &[u8] {
        &aes.rks[aes.rks.len() - BLOCKSIZE..]
    }

    #[test]
    fn key_schedule_128() -> Result<()> {
        // FIPS-197 Appendix A.1, final round key
        let mut aes = Aes::new();
        aes.init(&from_hex("2b7e151628aed2a6abf7158809cf4f3c"))?;

        assert_eq!(aes.rks.len(), (AES128_ROUNDS + 1) * BLOCKSIZE);
        assert_eq!(
            last_round_key(&aes),
            from_hex("d014f9a8c9ee2589e13f0cc8b6630ca6")
        );
        Ok(())
    }

    #[test]
    fn key_schedule_192() -> Result<()> {
        // FIPS-197 Appendix A.2, final round key
        let mut aes = Aes::new();
        aes.init(&from_hex("8e73b0f7da0e6452c810f32b809079e562f8ead2522c6b7b"))?;

        assert_eq!(aes.rks.len(), (AES192_ROUNDS + 1) * BLOCKSIZE);
        assert_eq!(
            last_round_key(&aes),
            from_hex("e98ba06f448c773c8ecc720401002202")
        );
        Ok(())
    }

    #[test]
    fn key_schedule_256() -> Result<()> {
        // FIPS-197 Appendix A.3, final round key
        let mut aes = Aes::new();
        aes.init(&from_hex(
            "603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4",
        ))?;

        assert_eq!(aes.rks.len(), (AES256_ROUNDS + 1) * BLOCKSIZE);
        assert_eq!(
            last_round_key(&aes),
            from_hex("fe4890d1e6188d0b046df344706c631e")
        );
        Ok(())
    }

    #[test]
    fn rejects_bad_key_length() {
        let mut aes = Aes::new();
        assert!(matches!(
            aes.init(&[0u8; 20]),
            Err(Error::InvalidKeyLength { len: 20 })
        ));
    }

    #[test]
    fn fips197_appendix_b_block() -> Result<()> {
        let mut aes = Aes::new();
        aes.init(&from_hex("2b7e151628aed2a6abf7158809cf4f3c"))?;

        let pt = from_hex("3243f6a8885a308d313198a2e0370734");
        let ct = from_hex("3925841d02dc09fbdc118597196a0b32");

        let mut enc = [0u8; BLOCKSIZE];
        aes.encrypt_block(&pt, &mut enc);
        assert_eq!(enc.as_slice(), ct);

        let mut dec = [0u8; BLOCKSIZE];
        aes.decrypt_block(&ct, &mut dec);
        assert_eq!(dec.as_slice(), pt);
        Ok(())
    }

    #[test]
    fn reports_variant_name() -> Result<()> {
        let mut aes = Aes::new();
        aes.init(&[0u8; 24])?;
        assert_eq!(aes.name(), "AES-192");
        assert_eq!(aes.key_size(), 24);
        assert_eq!(aes.block_size(), 16);
        Ok(())
    }

    #[test]
    fn reinit_replaces_schedule() -> Result<()> {
        let pt = from_hex("3243f6a8885a308d313198a2e0370734");

        let mut aes = Aes::new();
        aes.init(&[0u8; 16])?;
        let mut first = [0u8; BLOCKSIZE];
        aes.encrypt_block(&pt, &mut first);

        aes.init(&from_hex("2b7e151628aed2a6abf7158809cf4f3c"))?;
        let mut second = [0u8; BLOCKSIZE];
        aes.encrypt_block(&pt, &mut second);

        assert_eq!(
            second.as_slice(),
            from_hex("3925841d02dc09fbdc118597196a0b32")
        );
        assert_ne!(first, second);
        Ok(())
    }
}
