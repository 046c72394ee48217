use crate::defined::METER;

mod drive;
mod fpga_info;
mod stm_focus;

pub use drive::{quantize, Drive, LegacyDrive};
pub use fpga_info::FPGAInfo;
pub use stm_focus::STMFocus;

pub const FPGA_CLK_FREQ: u32 = 163_840_000;

/// Smallest cycle a transducer can be driven with
pub const CYCLE_MIN: u16 = 1;

/// Cycle used to quantize drives in legacy mode
pub const LEGACY_CYCLE: u16 = 256;

pub const MOD_SAMPLING_FREQ_DIV_MIN: u32 = 1160;
pub const MOD_BUF_SIZE_MAX: usize = 65536;

pub const SILENCER_CYCLE_MIN: u16 = 1044;
pub const SILENCER_CYCLE_DEFAULT: u16 = 4096;
pub const SILENCER_STEP_DEFAULT: u16 = 10;

pub const STM_BUF_SIZE_MIN: usize = 2;

pub const FOCUS_STM_SAMPLING_FREQ_DIV_MIN: u32 = 1612;
pub const FOCUS_STM_BUF_SIZE_MAX: usize = 65536;

pub const GAIN_STM_SAMPLING_FREQ_DIV_MIN: u32 = 276;
pub const GAIN_STM_LEGACY_SAMPLING_FREQ_DIV_MIN: u32 = 152;
pub const GAIN_STM_BUF_SIZE_MAX: usize = 1024;
pub const GAIN_STM_LEGACY_BUF_SIZE_MAX: usize = 2048;

pub const FOCUS_STM_FIXED_NUM_UNIT: f64 = 0.025e-3 * METER;
pub const FOCUS_STM_FIXED_NUM_WIDTH: usize = 18;
pub const FOCUS_STM_FIXED_NUM_UPPER: i32 = (1 << (FOCUS_STM_FIXED_NUM_WIDTH - 1)) - 1;
pub const FOCUS_STM_FIXED_NUM_LOWER: i32 = -(1 << (FOCUS_STM_FIXED_NUM_WIDTH - 1));

/// Convert a speed of sound into the fixed point representation of the firmware
///
/// The firmware expects `round(c * 1024)` with `c` in m/s.
pub fn sound_speed_to_fixed(sound_speed: f64) -> u32 {
    (sound_speed / METER * 1024.0).round() as u32
}
