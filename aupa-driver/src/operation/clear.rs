use crate::{
    cpu::{CPUControlFlags, FPGAControlFlags, MsgId, TxDatagram},
    error::AUPADriverError,
    operation::Operation,
};

/// Reset the firmware to its initial state
///
/// The fan and FPGA info flags set by the controller survive the reset of the frame.
#[derive(Default)]
pub struct ClearOp {
    sent: bool,
}

impl Operation for ClearOp {
    fn init(&mut self) {
        self.sent = false;
    }

    fn pack(&mut self, tx: &mut TxDatagram) -> Result<(), AUPADriverError> {
        let kept = tx.header().fpga_flag
            & (FPGAControlFlags::FORCE_FAN | FPGAControlFlags::READS_FPGA_INFO);
        tx.clear();
        tx.header_mut().fpga_flag = kept;
        tx.header_mut().msg_id = MsgId::CLEAR;
        tx.header_mut().cpu_flag = CPUControlFlags::NONE;
        tx.header_mut().size = 0;
        self.sent = true;
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.sent
    }
}
