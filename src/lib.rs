//! From-scratch symmetric-cryptography primitives: the AES block cipher in
//! all three key sizes, a buffered streaming engine over pluggable chaining
//! modes (ECB, CBC, CFB, OFB, CTR), PKCS#7 padding, and a SHA-256 digest.
//!
//! The [`BufferedBlockCipher`] engine owns a [`BlockCipher`] and a
//! [`ChainingMode`] by composition and exposes the incremental
//! `update`/`do_final` contract; the modes own their feedback registers and
//! the cipher owns its key schedule.
//!
//! Functional correctness only: nothing here is hardened against timing or
//! cache side channels.

mod block;
mod digest;
mod error;
mod key;
mod mode;
mod padding;
mod stream;
pub mod util;

pub use block::{Aes, BlockCipher};
pub use digest::{Digest, Sha256};
pub use error::{Error, Result};
pub use key::Key;
pub use mode::{CbcMode, CfbMode, ChainingMode, CtrMode, Direction, EcbMode, OfbMode};
pub use padding::{Padding, Pkcs7Padding};
pub use stream::BufferedBlockCipher;
