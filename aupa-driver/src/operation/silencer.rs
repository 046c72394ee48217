use zerocopy::little_endian::U16;

use crate::{
    cpu::{CPUControlFlags, SilencerHeader, TxDatagram},
    error::AUPADriverError,
    fpga::SILENCER_CYCLE_MIN,
    operation::{write_to_tx, Operation},
};

pub struct ConfigSilencerOp {
    cycle: u16,
    step: u16,
    sent: bool,
}

impl ConfigSilencerOp {
    pub const fn new(cycle: u16, step: u16) -> Self {
        Self {
            cycle,
            step,
            sent: false,
        }
    }
}

impl Operation for ConfigSilencerOp {
    fn init(&mut self) {
        self.sent = false;
    }

    fn pack(&mut self, tx: &mut TxDatagram) -> Result<(), AUPADriverError> {
        tx.header_mut().cpu_flag.remove(CPUControlFlags::HEADER_MASK);
        tx.header_mut().size = 0;

        if self.is_finished() {
            return Ok(());
        }

        if self.cycle < SILENCER_CYCLE_MIN {
            return Err(AUPADriverError::SilencerCycleOutOfRange(self.cycle));
        }

        write_to_tx(
            &mut tx.header_mut().payload,
            SilencerHeader {
                cycle: U16::new(self.cycle),
                step: U16::new(self.step),
            },
        );
        tx.header_mut().size = size_of::<SilencerHeader>() as u8;
        tx.header_mut()
            .cpu_flag
            .insert(CPUControlFlags::CONFIG_SILENCER);

        self.sent = true;
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.sent
    }
}
