use zerocopy::little_endian::U16;

use crate::{
    cpu::{CPUControlFlags, FPGAControlFlags, TxDatagram},
    error::AUPADriverError,
    fpga::Drive,
    operation::{validate_cycles, Mode, Operation},
};

/// Write the drive of every transducer into the body
pub struct GainOp {
    mode: Mode,
    drives: Vec<Drive>,
    cycles: Vec<u16>,
    phase_sent: bool,
    duty_sent: bool,
}

impl GainOp {
    /// `drives` and `cycles` hold one entry per transducer, in device order
    ///
    /// `cycles` is ignored in legacy mode.
    pub fn new(mode: Mode, drives: Vec<Drive>, cycles: Vec<u16>) -> Self {
        Self {
            mode,
            drives,
            cycles,
            phase_sent: false,
            duty_sent: false,
        }
    }

    fn validate(&self, tx: &TxDatagram) -> Result<(), AUPADriverError> {
        if self.drives.len() != tx.num_transducers() {
            return Err(AUPADriverError::DrivesSizeMismatch(
                self.drives.len(),
                tx.num_transducers(),
            ));
        }
        if self.mode != Mode::Legacy {
            validate_cycles(&self.cycles, tx)?;
        }
        Ok(())
    }

    fn pack_legacy(&self, tx: &mut TxDatagram) {
        tx.body_raw_mut()
            .iter_mut()
            .zip(self.drives.iter())
            .for_each(|(d, s)| *d = U16::new(s.legacy().to_word()));
    }

    fn pack_phase(&self, tx: &mut TxDatagram) {
        tx.body_raw_mut()
            .iter_mut()
            .zip(self.drives.iter().zip(self.cycles.iter()))
            .for_each(|(d, (s, &c))| *d = U16::new(s.phase_word(c)));
    }

    fn pack_duty(&self, tx: &mut TxDatagram) {
        tx.body_raw_mut()
            .iter_mut()
            .zip(self.drives.iter().zip(self.cycles.iter()))
            .for_each(|(d, (s, &c))| *d = U16::new(s.duty_word(c)));
    }
}

impl Operation for GainOp {
    fn init(&mut self) {
        self.phase_sent = false;
        self.duty_sent = false;
    }

    fn pack(&mut self, tx: &mut TxDatagram) -> Result<(), AUPADriverError> {
        tx.header_mut().cpu_flag.remove(CPUControlFlags::BODY_MASK);

        if self.is_finished() {
            return Ok(());
        }

        self.validate(tx)?;

        tx.header_mut().fpga_flag.remove(FPGAControlFlags::STM_MODE);
        tx.header_mut()
            .fpga_flag
            .set(FPGAControlFlags::LEGACY_MODE, self.mode == Mode::Legacy);

        match self.mode {
            Mode::Legacy => {
                self.pack_legacy(tx);
                self.phase_sent = true;
                self.duty_sent = true;
            }
            Mode::Normal if !self.phase_sent => {
                self.pack_phase(tx);
                self.phase_sent = true;
            }
            Mode::Normal => {
                self.pack_duty(tx);
                tx.header_mut().cpu_flag.insert(CPUControlFlags::IS_DUTY);
                self.duty_sent = true;
            }
            Mode::NormalPhase => {
                self.pack_phase(tx);
                self.phase_sent = true;
                self.duty_sent = true;
            }
        }

        tx.header_mut().cpu_flag.insert(CPUControlFlags::WRITE_BODY);

        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.phase_sent && self.duty_sent
    }
}
