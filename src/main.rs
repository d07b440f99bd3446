mod args;

use args::{Cli, Commands, CommonArgs, Mode};
use clap::Parser;

use std::fs;
use std::time::Instant;

use thiserror::Error;

use cipherbuf::{
    Aes, BufferedBlockCipher, CbcMode, CfbMode, ChainingMode, CtrMode, Direction, EcbMode, Key,
    OfbMode, Pkcs7Padding, util,
};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("--iv is required when decrypting in this mode")]
    MissingIv,

    #[error("invalid --iv hex: {0}")]
    IvInvalidHex(#[from] std::num::ParseIntError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Cipher(#[from] cipherbuf::Error),
}

fn main() {
    if let Err(e) = cipherbuf_cli() {
        eprintln!("error: {e}");
    }
}

fn cipherbuf_cli() -> Result<(), CliError> {
    let args = Cli::parse();

    match args.command {
        Commands::Encrypt(enc) => {
            let plaintext = fs::read(&enc.common.input)?;

            // read or generate key
            let key = if enc.gen_key {
                let rand_key = match enc.key_size {
                    args::KeySize::Bits128 => Key::rand_key_128()?,
                    args::KeySize::Bits192 => Key::rand_key_192()?,
                    args::KeySize::Bits256 => Key::rand_key_256()?,
                };
                fs::write(&enc.common.key, rand_key.as_bytes())?;
                rand_key.as_bytes().to_vec()
            } else {
                fs::read(&enc.common.key)?
            };

            // read or generate IV; ECB takes none
            let iv = match (enc.common.mode, &enc.common.iv) {
                (Mode::Ecb, _) => Vec::new(),
                (_, Some(hex)) => parse_iv(hex)?,
                (_, None) => {
                    let iv = util::random_iv(16)?;
                    println!("iv = {}", util::to_hex(&iv));
                    iv
                }
            };

            let mut engine = build_engine(enc.common.mode);
            engine.init(Direction::Encrypt, &key, &iv)?;

            let start = Instant::now();
            let ciphertext = engine.do_final_with(&plaintext)?;
            let duration = start.elapsed();

            fs::write(&enc.common.output, &ciphertext)?;
            println!(
                "{}: encrypted {} bytes in {} ms",
                engine.name(),
                plaintext.len(),
                duration.as_millis()
            );
            Ok(())
        }
        Commands::Decrypt(common) => {
            let ciphertext = fs::read(&common.input)?;
            let key = fs::read(&common.key)?;
            let iv = decrypt_iv(&common)?;

            let mut engine = build_engine(common.mode);
            engine.init(Direction::Decrypt, &key, &iv)?;

            let start = Instant::now();
            let plaintext = engine.do_final_with(&ciphertext)?;
            let duration = start.elapsed();

            fs::write(&common.output, &plaintext)?;
            println!(
                "{}: decrypted {} bytes in {} ms",
                engine.name(),
                plaintext.len(),
                duration.as_millis()
            );
            Ok(())
        }
    }
}

fn decrypt_iv(common: &CommonArgs) -> Result<Vec<u8>, CliError> {
    match (common.mode, &common.iv) {
        (Mode::Ecb, _) => Ok(Vec::new()),
        (_, Some(hex)) => Ok(parse_iv(hex)?),
        (_, None) => Err(CliError::MissingIv),
    }
}

fn build_engine(mode: Mode) -> BufferedBlockCipher {
    let chaining: Box<dyn ChainingMode> = match mode {
        Mode::Ecb => Box::new(EcbMode::new()),
        Mode::Cbc => Box::new(CbcMode::new()),
        Mode::Cfb => Box::new(CfbMode::new()),
        Mode::Ofb => Box::new(OfbMode::new()),
        Mode::Ctr => Box::new(CtrMode::new()),
    };

    let mut engine = BufferedBlockCipher::new(Box::new(Aes::new()), chaining);

    // block modes need whole blocks; the stream modes run unpadded
    if matches!(mode, Mode::Ecb | Mode::Cbc) {
        engine.set_padding(Box::new(Pkcs7Padding::new(16)));
    }

    engine
}

fn parse_iv(s: &str) -> Result<Vec<u8>, std::num::ParseIntError> {
    let hex: String = s.chars().filter(|c| !c.is_whitespace()).collect();

    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..(i + 2).min(hex.len())], 16))
        .collect::<Result<Vec<u8>, _>>()
}
