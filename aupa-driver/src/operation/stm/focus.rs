use zerocopy::{
    little_endian::{U16, U32},
    FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned,
};

use crate::{
    cpu::{CPUControlFlags, FPGAControlFlags, TxDatagram},
    error::AUPADriverError,
    fpga::{
        sound_speed_to_fixed, STMFocus, FOCUS_STM_BUF_SIZE_MAX, FOCUS_STM_SAMPLING_FREQ_DIV_MIN,
        STM_BUF_SIZE_MIN,
    },
    geometry::Vector3,
    operation::{write_to_tx, Operation},
};

use super::{idx_flags, validate_idx};

/// A focus point in the local frame of a device
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint {
    pub point: Vector3,
    pub duty_shift: u8,
}

impl ControlPoint {
    pub const fn new(point: Vector3, duty_shift: u8) -> Self {
        Self { point, duty_shift }
    }
}

/// Metadata at the head of every body region of the first FocusSTM frame
#[repr(C)]
#[derive(Clone, Copy, Debug, IntoBytes, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct FocusSTMBodyInitial {
    pub size: U16,
    pub freq_div: U32,
    pub sound_speed: U32,
    pub start_idx: U16,
    pub finish_idx: U16,
}

/// Metadata at the head of every body region of the following FocusSTM frames
#[repr(C)]
#[derive(Clone, Copy, Debug, IntoBytes, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct FocusSTMBodySubsequent {
    pub size: U16,
}

/// Stream focus trajectories, one per device, through the body
pub struct FocusSTMOp {
    points: Vec<Vec<ControlPoint>>,
    freq_div: u32,
    sound_speed: f64,
    start_idx: Option<u16>,
    finish_idx: Option<u16>,
    sent: usize,
}

impl FocusSTMOp {
    /// `points[i]` is the trajectory of the `i`-th device; all must have the same length
    pub fn new(
        points: Vec<Vec<ControlPoint>>,
        freq_div: u32,
        sound_speed: f64,
        start_idx: Option<u16>,
        finish_idx: Option<u16>,
    ) -> Self {
        Self {
            points,
            freq_div,
            sound_speed,
            start_idx,
            finish_idx,
            sent: 0,
        }
    }

    fn size(&self) -> usize {
        self.points.first().map_or(0, |p| p.len())
    }

    fn validate(&self, tx: &TxDatagram) -> Result<(), AUPADriverError> {
        if self.points.len() != tx.num_devices() {
            return Err(AUPADriverError::DeviceMapMismatch(
                self.points.len(),
                tx.num_devices(),
            ));
        }
        let size = self.size();
        if self.points.iter().any(|p| p.len() != size) {
            return Err(AUPADriverError::FocusSTMPointSizeMismatch);
        }
        if !(STM_BUF_SIZE_MIN..=FOCUS_STM_BUF_SIZE_MAX).contains(&size) {
            return Err(AUPADriverError::FocusSTMPointSizeOutOfRange(size));
        }
        if self.freq_div < FOCUS_STM_SAMPLING_FREQ_DIV_MIN {
            return Err(AUPADriverError::FreqDivOutOfRange(
                self.freq_div,
                FOCUS_STM_SAMPLING_FREQ_DIV_MIN,
            ));
        }
        validate_idx(self.start_idx, self.finish_idx, size)
    }

    /// Number of points that fit into the current frame
    fn capacity(&self, tx: &TxDatagram) -> usize {
        let body_bytes = (0..tx.num_devices())
            .map(|i| tx.body(i).len() * size_of::<U16>())
            .min()
            .unwrap_or(0);
        let meta = if self.sent == 0 {
            size_of::<FocusSTMBodyInitial>()
        } else {
            size_of::<FocusSTMBodySubsequent>()
        };
        body_bytes.saturating_sub(meta) / size_of::<STMFocus>()
    }
}

impl Operation for FocusSTMOp {
    fn init(&mut self) {
        self.sent = 0;
    }

    fn pack(&mut self, tx: &mut TxDatagram) -> Result<(), AUPADriverError> {
        tx.header_mut().cpu_flag.remove(CPUControlFlags::BODY_MASK);

        if self.is_finished() {
            return Ok(());
        }

        let is_first_frame = self.sent == 0;
        if is_first_frame {
            self.validate(tx)?;
        }

        let size = self.size();
        let capacity = self.capacity(tx);
        if capacity == 0 {
            return Err(AUPADriverError::InsufficientBodySize(
                (0..tx.num_devices())
                    .map(|i| tx.body(i).len())
                    .min()
                    .unwrap_or(0),
            ));
        }
        let send_num = (size - self.sent).min(capacity);

        let sound_speed = sound_speed_to_fixed(self.sound_speed);
        self.points.iter().enumerate().try_for_each(|(i, points)| {
            let body = tx.body_bytes_mut(i);
            let offset = if is_first_frame {
                write_to_tx(
                    body,
                    FocusSTMBodyInitial {
                        size: U16::new(send_num as u16),
                        freq_div: U32::new(self.freq_div),
                        sound_speed: U32::new(sound_speed),
                        start_idx: U16::new(self.start_idx.unwrap_or(0)),
                        finish_idx: U16::new(self.finish_idx.unwrap_or(0)),
                    },
                );
                size_of::<FocusSTMBodyInitial>()
            } else {
                write_to_tx(
                    body,
                    FocusSTMBodySubsequent {
                        size: U16::new(send_num as u16),
                    },
                );
                size_of::<FocusSTMBodySubsequent>()
            };
            body[offset..]
                .chunks_exact_mut(size_of::<STMFocus>())
                .zip(points.iter().skip(self.sent).take(send_num))
                .try_for_each(|(dst, p)| {
                    write_to_tx(dst, STMFocus::create(&p.point, p.duty_shift)?);
                    Ok::<_, AUPADriverError>(())
                })
        })?;

        let header = tx.header_mut();
        header.fpga_flag.insert(FPGAControlFlags::STM_MODE);
        header.fpga_flag.remove(
            FPGAControlFlags::STM_GAIN_MODE
                | FPGAControlFlags::USE_STM_START_IDX
                | FPGAControlFlags::USE_STM_FINISH_IDX,
        );
        header
            .fpga_flag
            .insert(idx_flags(self.start_idx, self.finish_idx));
        header.cpu_flag.insert(CPUControlFlags::WRITE_BODY);
        if is_first_frame {
            header.cpu_flag.insert(CPUControlFlags::STM_BEGIN);
        }
        if self.sent + send_num == size {
            header.cpu_flag.insert(CPUControlFlags::STM_END);
        }

        self.sent += send_num;
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.size() != 0 && self.sent == self.size()
    }
}
