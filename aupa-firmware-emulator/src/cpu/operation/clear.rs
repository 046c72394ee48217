use crate::CPUEmulator;

impl CPUEmulator {
    pub(crate) fn clear(&mut self) {
        self.reads_fpga_info = false;
        self.stm_write = 0;
        self.fpga.init();
    }
}
