use crate::{
    cpu::{CPUControlFlags, MsgId, TxDatagram},
    error::AUPADriverError,
    operation::Operation,
};

/// Firmware register read through a reserved message id
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FirmwareInfoType {
    CPUVersionMajor,
    CPUVersionMinor,
    FPGAVersionMajor,
    FPGAVersionMinor,
    FPGAFunctions,
}

impl FirmwareInfoType {
    pub const fn msg_id(&self) -> u8 {
        match self {
            Self::CPUVersionMajor => MsgId::RD_CPU_VERSION,
            Self::CPUVersionMinor => MsgId::RD_CPU_VERSION_MINOR,
            Self::FPGAVersionMajor => MsgId::RD_FPGA_VERSION,
            Self::FPGAVersionMinor => MsgId::RD_FPGA_VERSION_MINOR,
            Self::FPGAFunctions => MsgId::RD_FPGA_FUNCTION,
        }
    }
}

/// Request one firmware register; every device answers in its ack byte
pub struct FirmwareInfoOp {
    ty: FirmwareInfoType,
    sent: bool,
}

impl FirmwareInfoOp {
    pub const fn new(ty: FirmwareInfoType) -> Self {
        Self { ty, sent: false }
    }
}

impl Operation for FirmwareInfoOp {
    fn init(&mut self) {
        self.sent = false;
    }

    fn pack(&mut self, tx: &mut TxDatagram) -> Result<(), AUPADriverError> {
        tx.header_mut().cpu_flag.remove(CPUControlFlags::HEADER_MASK);
        tx.header_mut().size = 0;
        tx.header_mut().msg_id = self.ty.msg_id();
        self.sent = true;
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.sent
    }
}
