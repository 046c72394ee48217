use crate::{
    cpu::{CPUControlFlags, TxDatagram},
    error::AUPADriverError,
    operation::Operation,
};

/// Header operation carrying nothing
#[derive(Default)]
pub struct NullHeader {}

impl Operation for NullHeader {
    fn init(&mut self) {}

    fn pack(&mut self, tx: &mut TxDatagram) -> Result<(), AUPADriverError> {
        tx.header_mut().cpu_flag.remove(CPUControlFlags::HEADER_MASK);
        tx.header_mut().size = 0;
        Ok(())
    }

    fn is_finished(&self) -> bool {
        true
    }
}

/// Body operation carrying nothing
#[derive(Default)]
pub struct NullBody {}

impl Operation for NullBody {
    fn init(&mut self) {}

    fn pack(&mut self, tx: &mut TxDatagram) -> Result<(), AUPADriverError> {
        tx.header_mut().cpu_flag.remove(CPUControlFlags::BODY_MASK);
        Ok(())
    }

    fn is_finished(&self) -> bool {
        true
    }
}
