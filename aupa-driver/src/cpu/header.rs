use std::mem::size_of;

use zerocopy::{
    little_endian::{U16, U32},
    FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned,
};

use super::{CPUControlFlags, FPGAControlFlags};

pub const HEADER_SIZE: usize = 128;
pub const PAYLOAD_SIZE: usize = 112;

/// GainSTM metadata, valid only on the frame that carries `STM_BEGIN`
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, IntoBytes, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct GainSTMControl {
    pub freq_div: U32,
    pub mode: U16,
    pub frame_count: U16,
    pub start_idx: U16,
    pub finish_idx: U16,
}

#[repr(C)]
#[derive(Clone, Debug, IntoBytes, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct Header {
    pub msg_id: u8,
    pub fpga_flag: FPGAControlFlags,
    pub cpu_flag: CPUControlFlags,
    /// Number of valid bytes of the mode-tagged payload
    pub size: u8,
    pub gain_stm: GainSTMControl,
    pub payload: [u8; PAYLOAD_SIZE],
}

impl Default for Header {
    fn default() -> Self {
        Self {
            msg_id: 0,
            fpga_flag: FPGAControlFlags::NONE,
            cpu_flag: CPUControlFlags::NONE,
            size: 0,
            gain_stm: GainSTMControl::default(),
            payload: [0; PAYLOAD_SIZE],
        }
    }
}

/// Payload of a silencer configuration frame
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoBytes, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct SilencerHeader {
    pub cycle: U16,
    pub step: U16,
}

/// Payload of the first modulation frame
#[repr(C)]
#[derive(Clone, Copy, Debug, IntoBytes, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct ModHeadInitial {
    pub freq_div: U32,
    pub data: [u8; PAYLOAD_SIZE - size_of::<U32>()],
}

/// Payload of the following modulation frames
#[repr(C)]
#[derive(Clone, Copy, Debug, IntoBytes, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct ModHeadSubsequent {
    pub data: [u8; PAYLOAD_SIZE],
}

/// Bytes of modulation data in the first frame
pub const MOD_HEAD_INITIAL_CAPACITY: usize = size_of::<ModHeadInitial>() - size_of::<U32>();
/// Bytes of modulation data in every following frame
pub const MOD_HEAD_SUBSEQUENT_CAPACITY: usize = size_of::<ModHeadSubsequent>();
