mod clear;
mod gain;
mod info;
mod modulation;
mod null;
mod silencer;
pub mod stm;
mod sync;

pub use clear::*;
pub use gain::*;
pub use info::*;
pub use modulation::*;
pub use null::*;
pub use silencer::*;
pub use stm::*;
pub use sync::*;

use zerocopy::{Immutable, IntoBytes};

use crate::{cpu::TxDatagram, error::AUPADriverError, fpga::CYCLE_MIN};

/// Firmware resolution of drives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    /// 8-bit phase and duty packed into one word
    #[default]
    Legacy,
    /// Phase and duty with the cycle of each transducer, sent in two frames
    Normal,
    /// Phase only with the cycle of each transducer
    NormalPhase,
}

/// A stateful packer of one logical command
///
/// A command that does not fit into one frame is streamed: the caller repeats
/// `pack` on fresh frames until `is_finished` returns `true`.
pub trait Operation {
    /// Rewind the cursor to the start of the command
    fn init(&mut self);
    /// Write the next frame's worth of data into `tx`
    fn pack(&mut self, tx: &mut TxDatagram) -> Result<(), AUPADriverError>;
    /// Check if no data remains
    fn is_finished(&self) -> bool;
}

impl Operation for Box<dyn Operation> {
    fn init(&mut self) {
        self.as_mut().init()
    }

    fn pack(&mut self, tx: &mut TxDatagram) -> Result<(), AUPADriverError> {
        self.as_mut().pack(tx)
    }

    fn is_finished(&self) -> bool {
        self.as_ref().is_finished()
    }
}

/// Check the length of `cycles` and that every cycle is usable for quantization
pub(crate) fn validate_cycles(cycles: &[u16], tx: &TxDatagram) -> Result<(), AUPADriverError> {
    if cycles.len() != tx.num_transducers() {
        return Err(AUPADriverError::CyclesSizeMismatch(
            cycles.len(),
            tx.num_transducers(),
        ));
    }
    match cycles.iter().find(|&&c| c < CYCLE_MIN) {
        Some(&c) => Err(AUPADriverError::CycleOutOfRange(c)),
        None => Ok(()),
    }
}

pub(crate) fn write_to_tx<T: IntoBytes + Immutable>(tx: &mut [u8], data: T) {
    tx[..size_of::<T>()].copy_from_slice(data.as_bytes());
}
