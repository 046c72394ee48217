use zerocopy::little_endian::{U16, U32};

use crate::{
    cpu::{CPUControlFlags, FPGAControlFlags, GainSTMControl, GainSTMMode, TxDatagram},
    error::AUPADriverError,
    fpga::{
        Drive, GAIN_STM_BUF_SIZE_MAX, GAIN_STM_LEGACY_BUF_SIZE_MAX,
        GAIN_STM_LEGACY_SAMPLING_FREQ_DIV_MIN, GAIN_STM_SAMPLING_FREQ_DIV_MIN, STM_BUF_SIZE_MIN,
    },
    operation::{validate_cycles, Mode, Operation},
};

use super::{idx_flags, validate_idx};

/// Stream a sequence of drive frames through the body, one frame per step
pub struct GainSTMOp {
    frames: Vec<Vec<Drive>>,
    cycles: Vec<u16>,
    mode: Mode,
    freq_div: u32,
    start_idx: Option<u16>,
    finish_idx: Option<u16>,
    sent: usize,
    duty_next: bool,
}

impl GainSTMOp {
    /// Every frame holds one drive per transducer, in device order
    ///
    /// `cycles` is ignored in legacy mode.
    pub fn new(
        frames: Vec<Vec<Drive>>,
        cycles: Vec<u16>,
        mode: Mode,
        freq_div: u32,
        start_idx: Option<u16>,
        finish_idx: Option<u16>,
    ) -> Self {
        Self {
            frames,
            cycles,
            mode,
            freq_div,
            start_idx,
            finish_idx,
            sent: 0,
            duty_next: false,
        }
    }

    const fn stm_mode(&self) -> GainSTMMode {
        match self.mode {
            Mode::Legacy | Mode::Normal => GainSTMMode::PhaseDutyFull,
            Mode::NormalPhase => GainSTMMode::PhaseFull,
        }
    }

    fn validate(&self, tx: &TxDatagram) -> Result<(), AUPADriverError> {
        let (freq_div_min, size_max) = match self.mode {
            Mode::Legacy => (
                GAIN_STM_LEGACY_SAMPLING_FREQ_DIV_MIN,
                GAIN_STM_LEGACY_BUF_SIZE_MAX,
            ),
            Mode::Normal | Mode::NormalPhase => {
                (GAIN_STM_SAMPLING_FREQ_DIV_MIN, GAIN_STM_BUF_SIZE_MAX)
            }
        };
        if self.freq_div < freq_div_min {
            return Err(AUPADriverError::FreqDivOutOfRange(
                self.freq_div,
                freq_div_min,
            ));
        }
        if !(STM_BUF_SIZE_MIN..=size_max).contains(&self.frames.len()) {
            return Err(AUPADriverError::GainSTMSizeOutOfRange(
                self.frames.len(),
                size_max,
            ));
        }
        validate_idx(self.start_idx, self.finish_idx, self.frames.len())?;
        if let Some(frame) = self
            .frames
            .iter()
            .find(|f| f.len() != tx.num_transducers())
        {
            return Err(AUPADriverError::DrivesSizeMismatch(
                frame.len(),
                tx.num_transducers(),
            ));
        }
        if self.mode != Mode::Legacy {
            validate_cycles(&self.cycles, tx)?;
        }
        Ok(())
    }
}

impl Operation for GainSTMOp {
    fn init(&mut self) {
        self.sent = 0;
        self.duty_next = false;
    }

    fn pack(&mut self, tx: &mut TxDatagram) -> Result<(), AUPADriverError> {
        tx.header_mut().cpu_flag.remove(CPUControlFlags::BODY_MASK);

        if self.is_finished() {
            return Ok(());
        }

        let is_first_call = self.sent == 0 && !self.duty_next;
        if is_first_call {
            self.validate(tx)?;
            tx.header_mut().gain_stm = GainSTMControl {
                freq_div: U32::new(self.freq_div),
                mode: U16::new(self.stm_mode() as u16),
                frame_count: U16::new(self.frames.len() as u16),
                start_idx: U16::new(self.start_idx.unwrap_or(0)),
                finish_idx: U16::new(self.finish_idx.unwrap_or(0)),
            };
        }

        let frame = &self.frames[self.sent];
        let mut is_duty = false;
        match self.mode {
            Mode::Legacy => {
                tx.body_raw_mut()
                    .iter_mut()
                    .zip(frame.iter())
                    .for_each(|(d, s)| *d = U16::new(s.legacy().to_word()));
                self.sent += 1;
            }
            Mode::Normal if self.duty_next => {
                tx.body_raw_mut()
                    .iter_mut()
                    .zip(frame.iter().zip(self.cycles.iter()))
                    .for_each(|(d, (s, &c))| *d = U16::new(s.duty_word(c)));
                is_duty = true;
                self.duty_next = false;
                self.sent += 1;
            }
            Mode::Normal | Mode::NormalPhase => {
                tx.body_raw_mut()
                    .iter_mut()
                    .zip(frame.iter().zip(self.cycles.iter()))
                    .for_each(|(d, (s, &c))| *d = U16::new(s.phase_word(c)));
                if self.mode == Mode::Normal {
                    self.duty_next = true;
                } else {
                    self.sent += 1;
                }
            }
        }

        let header = tx.header_mut();
        header
            .fpga_flag
            .insert(FPGAControlFlags::STM_MODE | FPGAControlFlags::STM_GAIN_MODE);
        header
            .fpga_flag
            .set(FPGAControlFlags::LEGACY_MODE, self.mode == Mode::Legacy);
        header.fpga_flag.remove(
            FPGAControlFlags::USE_STM_START_IDX | FPGAControlFlags::USE_STM_FINISH_IDX,
        );
        header
            .fpga_flag
            .insert(idx_flags(self.start_idx, self.finish_idx));
        header.cpu_flag.insert(CPUControlFlags::WRITE_BODY);
        header.cpu_flag.set(CPUControlFlags::IS_DUTY, is_duty);
        if is_first_call {
            header.cpu_flag.insert(CPUControlFlags::STM_BEGIN);
        }
        if self.is_finished() {
            header.cpu_flag.insert(CPUControlFlags::STM_END);
        }

        Ok(())
    }

    fn is_finished(&self) -> bool {
        !self.frames.is_empty() && self.sent == self.frames.len()
    }
}
