//! Chaining-mode strategies that drive a block cipher over a stream of
//! equal-sized units, carrying feedback state between units.

mod cbc;
mod cfb;
mod ctr;
mod ecb;
mod ofb;

pub use cbc::CbcMode;
pub use cfb::CfbMode;
pub use ctr::CtrMode;
pub use ecb::EcbMode;
pub use ofb::OfbMode;

use crate::block::BlockCipher;
use crate::error::Result;

/// Direction of one engine lifecycle.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Maps one unit of input onto one unit of output.
///
/// A mode owns its working register (IV, counter, or previous block) plus
/// an immutable copy of the initial value for reset; the block cipher is
/// supplied per call by the engine that owns both.
pub trait ChainingMode {
    /// Mode name, e.g. "CBC".
    fn name(&self) -> &'static str;

    /// Captures the initial IV/counter and sizes the working registers.
    fn init(&mut self, blocksize: usize, iv: &[u8]) -> Result<()>;

    /// Re-copies the initial IV/counter into the working register and
    /// clears any scratch keystream state.
    fn restore_to_initial_state(&mut self);

    /// Transforms the unit `src` into `dst`. Unit length is the engine's
    /// shift: always one block for ECB/CBC/CTR, 1..=block size for CFB/OFB.
    fn update_block(
        &mut self,
        cipher: &dyn BlockCipher,
        direction: Direction,
        src: &[u8],
        dst: &mut [u8],
    );
}
