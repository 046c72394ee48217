use aupa_driver::cpu::{Header, SilencerHeader};
use zerocopy::FromBytes;

use crate::CPUEmulator;

impl CPUEmulator {
    pub(crate) fn config_silencer(&mut self, header: &Header) {
        if let Ok((d, _)) = SilencerHeader::read_from_prefix(&header.payload) {
            self.fpga.silencer_cycle = d.cycle.get();
            self.fpga.silencer_step = d.step.get();
        }
    }
}
