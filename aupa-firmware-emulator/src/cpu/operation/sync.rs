use zerocopy::little_endian::U16;

use crate::CPUEmulator;

impl CPUEmulator {
    pub(crate) fn synchronize(&mut self, body: &[U16]) {
        self.fpga
            .cycles
            .iter_mut()
            .zip(body.iter())
            .for_each(|(c, w)| *c = w.get());
        self.synchronized = true;
    }
}
