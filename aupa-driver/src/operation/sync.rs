use zerocopy::little_endian::U16;

use crate::{
    cpu::{CPUControlFlags, TxDatagram},
    error::AUPADriverError,
    geometry::DEFAULT_CYCLE,
    operation::{validate_cycles, Operation},
};

/// Synchronize the devices and configure the cycle of every transducer
///
/// The cycles travel in the body, so this must be paired with [`NullBody`](super::NullBody).
pub struct SyncOp {
    cycles: Option<Vec<u16>>,
    sent: bool,
}

impl SyncOp {
    /// Every transducer runs with the default cycle
    pub fn legacy() -> Self {
        Self {
            cycles: None,
            sent: false,
        }
    }

    /// `cycles` holds one cycle per transducer, in device order
    pub fn normal(cycles: Vec<u16>) -> Self {
        Self {
            cycles: Some(cycles),
            sent: false,
        }
    }
}

impl Operation for SyncOp {
    fn init(&mut self) {
        self.sent = false;
    }

    fn pack(&mut self, tx: &mut TxDatagram) -> Result<(), AUPADriverError> {
        tx.header_mut().cpu_flag.remove(CPUControlFlags::HEADER_MASK);
        tx.header_mut().size = 0;

        if self.is_finished() {
            return Ok(());
        }

        match &self.cycles {
            None => tx.body_raw_mut().fill(U16::new(DEFAULT_CYCLE)),
            Some(cycles) => {
                validate_cycles(cycles, tx)?;
                tx.body_raw_mut()
                    .iter_mut()
                    .zip(cycles.iter())
                    .for_each(|(d, &c)| *d = U16::new(c));
            }
        }

        tx.header_mut().cpu_flag.insert(CPUControlFlags::CONFIG_SYNC);
        self.sent = true;

        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.sent
    }
}
