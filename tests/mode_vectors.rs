//! NIST SP 800-38A known-answer vectors for the chaining modes, driven
//! through the buffered engine with AES-128.

use hex_literal::hex;

use cipherbuf::{
    Aes, BufferedBlockCipher, CbcMode, CfbMode, ChainingMode, CtrMode, Direction, EcbMode, OfbMode,
    Result,
};

const KEY: [u8; 16] = hex!("2b7e151628aed2a6abf7158809cf4f3c");
const IV: [u8; 16] = hex!("000102030405060708090a0b0c0d0e0f");
const CTR_IV: [u8; 16] = hex!("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff");

const PLAINTEXT: [u8; 64] = hex!(
    "6bc1bee22e409f96e93d7e117393172a"
    "ae2d8a571e03ac9c9eb76fac45af8e51"
    "30c81c46a35ce411e5fbc1191a0a52ef"
    "f69f2445df4f9b17ad2b417be66c3710"
);

fn engine(mode: Box<dyn ChainingMode>) -> BufferedBlockCipher {
    BufferedBlockCipher::new(Box::new(Aes::new()), mode)
}

fn known_answer(mode: Box<dyn ChainingMode>, iv: &[u8], expected: &[u8]) -> Result<()> {
    let mut bbc = engine(mode);

    bbc.init(Direction::Encrypt, &KEY, iv)?;
    assert_eq!(bbc.do_final_with(&PLAINTEXT)?, expected, "encrypt");

    bbc.init(Direction::Decrypt, &KEY, iv)?;
    assert_eq!(bbc.do_final_with(expected)?, PLAINTEXT, "decrypt");

    Ok(())
}

#[test]
fn sp800_38a_ecb() -> Result<()> {
    known_answer(
        Box::new(EcbMode::new()),
        &[],
        &hex!(
            "3ad77bb40d7a3660a89ecaf32466ef97"
            "f5d3d58503b9699de785895a96fdbaaf"
            "43b1cd7f598ece23881b00e3ed030688"
            "7b0c785e27e8ad3f8223207104725dd4"
        ),
    )
}

#[test]
fn sp800_38a_cbc() -> Result<()> {
    known_answer(
        Box::new(CbcMode::new()),
        &IV,
        &hex!(
            "7649abac8119b246cee98e9b12e9197d"
            "5086cb9b507219ee95db113a917678b2"
            "73bed6b8e3c1743b7116e69e22229516"
            "3ff1caa1681fac09120eca307586e1a7"
        ),
    )
}

#[test]
fn sp800_38a_cfb128() -> Result<()> {
    known_answer(
        Box::new(CfbMode::new()),
        &IV,
        &hex!(
            "3b3fd92eb72dad20333449f8e83cfb4a"
            "c8a64537a0b3a93fcde3cdad9f1ce58b"
            "26751f67a3cbb140b1808cf187a4f4df"
            "c04b05357c5d1c0eeac4c66f9ff7f2e6"
        ),
    )
}

#[test]
fn sp800_38a_cfb8() -> Result<()> {
    // F.3.7/F.3.8: one-byte feedback over the first 18 plaintext bytes
    let pt = &PLAINTEXT[..18];
    let expected = hex!("3b79424c9c0dd436bace9e0ed4586a4f32b9");

    let mut bbc = engine(Box::new(CfbMode::new()));

    bbc.init(Direction::Encrypt, &KEY, &IV)?;
    bbc.set_shift(1)?;
    assert_eq!(bbc.do_final_with(pt)?, expected, "encrypt");

    bbc.init(Direction::Decrypt, &KEY, &IV)?;
    bbc.set_shift(1)?;
    assert_eq!(bbc.do_final_with(&expected)?, pt, "decrypt");

    Ok(())
}

#[test]
fn sp800_38a_ofb() -> Result<()> {
    known_answer(
        Box::new(OfbMode::new()),
        &IV,
        &hex!(
            "3b3fd92eb72dad20333449f8e83cfb4a"
            "7789508d16918f03f53c52dac54ed825"
            "9740051e9c5fecf64344f7a82260edcc"
            "304c6528f659c77866a510d9c1d6ae5e"
        ),
    )
}

#[test]
fn sp800_38a_ctr() -> Result<()> {
    known_answer(
        Box::new(CtrMode::new()),
        &CTR_IV,
        &hex!(
            "874d6191b620e3261bef6864990db6ce"
            "9806f66b7970fdff8617187bb9fffdff"
            "5ae4df3edbd5d35e5b4f09020db03eab"
            "1e031dda2fbe03d1792170a0f3009cee"
        ),
    )
}
