/// Message id of a normal command
///
/// Normal commands cycle through `MIN..=MAX`. Ids below `MIN` are reserved for
/// clear and the firmware info reads.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct MsgId(u8);

impl MsgId {
    pub const MIN: Self = MsgId(0x10);
    pub const MAX: Self = MsgId(0xF0);

    pub const CLEAR: u8 = 0x00;
    pub const RD_CPU_VERSION: u8 = 0x01;
    pub const RD_CPU_VERSION_MINOR: u8 = 0x02;
    pub const RD_FPGA_VERSION: u8 = 0x03;
    pub const RD_FPGA_VERSION_MINOR: u8 = 0x04;
    pub const RD_FPGA_FUNCTION: u8 = 0x05;

    pub const fn new(id: u8) -> Self {
        MsgId(id)
    }

    pub const fn get(&self) -> u8 {
        self.0
    }

    pub const fn increment(&mut self) {
        self.0 += 1;
        if self.0 > Self::MAX.0 {
            self.0 = Self::MIN.0;
        }
    }

    /// Check if `id` is one of the reserved ids
    pub const fn is_reserved(id: u8) -> bool {
        id < Self::MIN.0
    }
}

impl Default for MsgId {
    fn default() -> Self {
        Self::MIN
    }
}
