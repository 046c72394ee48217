use aupa_driver::cpu::MsgId;

use crate::{cpu::params::*, CPUEmulator};

impl CPUEmulator {
    /// Byte answered to a firmware info read
    pub(crate) fn firmware_info(&self, msg_id: u8) -> u8 {
        match msg_id {
            MsgId::RD_CPU_VERSION => CPU_VERSION_MAJOR,
            MsgId::RD_CPU_VERSION_MINOR => CPU_VERSION_MINOR,
            MsgId::RD_FPGA_VERSION => FPGA_VERSION_MAJOR,
            MsgId::RD_FPGA_VERSION_MINOR => FPGA_VERSION_MINOR,
            MsgId::RD_FPGA_FUNCTION => FPGA_FUNCTION_BITS,
            _ => 0x00,
        }
    }
}
