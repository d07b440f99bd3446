//! Byte-array and hex helpers shared by the library, its tests, and the CLI.

use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::error::Result;

/// Fills an IV/counter of the requested length with OS randomness.
pub fn random_iv(len: usize) -> Result<Vec<u8>> {
    let mut iv = vec![0u8; len];
    OsRng.try_fill_bytes(&mut iv)?;
    Ok(iv)
}

/// XORs the first `count` bytes of `lhs` and `rhs` into `dst`.
#[inline(always)]
pub(crate) fn xor_into(dst: &mut [u8], lhs: &[u8], rhs: &[u8], count: usize) {
    for i in 0..count {
        dst[i] = lhs[i] ^ rhs[i];
    }
}

/// Lowercase hex rendering of a byte slice.
pub fn to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        s.push_str(&format!("{b:02x}"));
    }
    s
}

/// Decodes a hex string. Whitespace is ignored; characters outside
/// `[0-9a-fA-F]` decode as zero.
pub fn from_hex(hex: &str) -> Vec<u8> {
    let digits: Vec<u8> = hex
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(decode_digit)
        .collect();

    digits.chunks_exact(2).map(|d| (d[0] << 4) | d[1]).collect()
}

fn decode_digit(ch: char) -> u8 {
    match ch {
        '0'..='9' => ch as u8 - b'0',
        'a'..='f' => ch as u8 - b'a' + 10,
        'A'..='F' => ch as u8 - b'A' + 10,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let bytes = [0x00u8, 0x01, 0x7f, 0x80, 0xfe, 0xff];
        assert_eq!(from_hex(&to_hex(&bytes)), bytes);
    }

    #[test]
    fn from_hex_ignores_whitespace() {
        assert_eq!(
            from_hex("2b7e1516 28aed2a6\nabf71588 09cf4f3c"),
            from_hex("2b7e151628aed2a6abf7158809cf4f3c")
        );
    }
}
