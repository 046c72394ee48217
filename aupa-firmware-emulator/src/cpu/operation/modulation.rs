use aupa_driver::cpu::{CPUControlFlags, Header, ModHeadInitial};
use zerocopy::FromBytes;

use crate::CPUEmulator;

impl CPUEmulator {
    pub(crate) fn write_mod(&mut self, header: &Header) {
        let size = header.size as usize;
        if header.cpu_flag.contains(CPUControlFlags::MOD_BEGIN) {
            let Ok((head, _)) = ModHeadInitial::read_from_prefix(&header.payload) else {
                return;
            };
            self.fpga.mod_freq_div = head.freq_div.get();
            self.fpga.mod_bram.clear();
            self.fpga.mod_bram.extend_from_slice(&head.data[..size]);
        } else {
            self.fpga
                .mod_bram
                .extend_from_slice(&header.payload[..size]);
        }

        if header.cpu_flag.contains(CPUControlFlags::MOD_END) {
            self.fpga.mod_cycle = self.fpga.mod_bram.len();
        }
    }
}
