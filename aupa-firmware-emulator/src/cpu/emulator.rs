use aupa_driver::cpu::{
    CPUControlFlags, FPGAControlFlags, MsgId, RxMessage, TxDatagram,
};

use crate::fpga::emulator::FPGAEmulator;

use super::params::*;

/// Software model of the CPU firmware of one device
pub struct CPUEmulator {
    pub(crate) idx: usize,
    pub(crate) num_transducers: usize,
    pub(crate) last_msg_id: u8,
    pub(crate) ack: u8,
    pub(crate) is_ack_used: bool,
    pub(crate) reads_fpga_info: bool,
    pub(crate) synchronized: bool,
    pub(crate) stm_write: usize,
    pub(crate) fpga: FPGAEmulator,
    pub(crate) broken: bool,
}

impl CPUEmulator {
    pub fn new(idx: usize, num_transducers: usize) -> Self {
        let mut s = Self {
            idx,
            num_transducers,
            last_msg_id: MSG_ID_INIT,
            ack: 0x00,
            is_ack_used: false,
            reads_fpga_info: false,
            synchronized: false,
            stm_write: 0,
            fpga: FPGAEmulator::new(num_transducers),
            broken: false,
        };
        s.init();
        s
    }

    /// Stop consuming frames, as if the device was disconnected
    pub fn break_down(&mut self) {
        self.broken = true;
    }

    pub fn repair(&mut self) {
        self.broken = false;
    }

    pub const fn idx(&self) -> usize {
        self.idx
    }

    pub const fn num_transducers(&self) -> usize {
        self.num_transducers
    }

    pub const fn synchronized(&self) -> bool {
        self.synchronized
    }

    pub const fn reads_fpga_info(&self) -> bool {
        self.reads_fpga_info
    }

    pub const fn fpga(&self) -> &FPGAEmulator {
        &self.fpga
    }

    pub fn fpga_mut(&mut self) -> &mut FPGAEmulator {
        &mut self.fpga
    }

    /// Status of the device; the ack reflects the current FPGA info while it is requested
    pub fn rx(&self) -> RxMessage {
        let ack = if !self.is_ack_used && self.reads_fpga_info {
            self.fpga.fpga_info().info()
        } else {
            self.ack
        };
        RxMessage {
            ack,
            msg_id: self.last_msg_id,
        }
    }

    /// Consume the part of `tx` addressed to this device
    pub fn send(&mut self, tx: &TxDatagram) {
        if self.broken {
            return;
        }
        self.ecat_recv(tx);
    }

    pub fn init(&mut self) {
        self.clear();
    }
}

impl CPUEmulator {
    fn ecat_recv(&mut self, tx: &TxDatagram) {
        let header = tx.header();

        if self.last_msg_id == header.msg_id {
            return;
        }
        self.last_msg_id = header.msg_id;

        if MsgId::is_reserved(header.msg_id) {
            self.handle_reserved(header.msg_id);
            return;
        }
        self.is_ack_used = false;
        self.ack = 0x00;

        self.reads_fpga_info = header
            .fpga_flag
            .contains(FPGAControlFlags::READS_FPGA_INFO);
        self.configure_fpga_flags(header.fpga_flag);

        let cpu_flag = header.cpu_flag;
        if cpu_flag.contains(CPUControlFlags::MOD) {
            self.write_mod(header);
        } else if cpu_flag.contains(CPUControlFlags::CONFIG_SILENCER) {
            self.config_silencer(header);
        } else if cpu_flag.contains(CPUControlFlags::CONFIG_SYNC) {
            self.synchronize(tx.body(self.idx));
        }

        if cpu_flag.contains(CPUControlFlags::WRITE_BODY) {
            let body = tx.body(self.idx);
            if !header.fpga_flag.contains(FPGAControlFlags::STM_MODE) {
                self.write_gain(cpu_flag, body);
            } else if header.fpga_flag.contains(FPGAControlFlags::STM_GAIN_MODE) {
                self.write_gain_stm(header, body);
            } else {
                self.write_focus_stm(header, body);
            }
        }
    }

    fn handle_reserved(&mut self, msg_id: u8) {
        match msg_id {
            MsgId::CLEAR => {
                self.clear();
                self.is_ack_used = false;
                self.ack = 0x00;
            }
            id => {
                self.is_ack_used = true;
                self.ack = self.firmware_info(id);
            }
        }
    }

    fn configure_fpga_flags(&mut self, flag: FPGAControlFlags) {
        self.fpga.legacy_mode = flag.contains(FPGAControlFlags::LEGACY_MODE);
        self.fpga.force_fan = flag.contains(FPGAControlFlags::FORCE_FAN);
        self.fpga.stm_mode = flag.contains(FPGAControlFlags::STM_MODE);
        self.fpga.stm_gain_mode = flag.contains(FPGAControlFlags::STM_GAIN_MODE);
    }
}
