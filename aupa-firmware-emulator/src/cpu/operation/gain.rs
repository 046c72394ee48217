use aupa_driver::{
    cpu::CPUControlFlags,
    fpga::LegacyDrive,
};
use zerocopy::little_endian::U16;

use crate::CPUEmulator;

impl CPUEmulator {
    pub(crate) fn write_gain(&mut self, cpu_flag: CPUControlFlags, body: &[U16]) {
        if self.fpga.legacy_mode {
            body.iter()
                .zip(self.fpga.phases.iter_mut().zip(self.fpga.duties.iter_mut()))
                .for_each(|(w, (p, d))| {
                    let drive = LegacyDrive::from_word(w.get());
                    *p = drive.phase as u16;
                    *d = drive.duty as u16;
                });
            return;
        }

        let dst = if cpu_flag.contains(CPUControlFlags::IS_DUTY) {
            &mut self.fpga.duties
        } else {
            &mut self.fpga.phases
        };
        dst.iter_mut().zip(body.iter()).for_each(|(d, w)| *d = w.get());
    }
}
