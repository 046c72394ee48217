use aupa_driver::{
    cpu::{RxDatagram, TxDatagram},
    geometry::Geometry,
    link::{Link, LinkError},
};
use aupa_firmware_emulator::CPUEmulator;

/// Link that talks to emulated devices and never fails
#[derive(Default)]
pub struct Nop {
    is_open: bool,
    cpus: Vec<CPUEmulator>,
}

impl Nop {
    pub const fn new() -> Self {
        Self {
            is_open: false,
            cpus: Vec::new(),
        }
    }
}

impl Link for Nop {
    fn open(&mut self, geometry: &Geometry) -> Result<(), LinkError> {
        self.cpus = geometry
            .iter()
            .map(|dev| CPUEmulator::new(dev.idx(), dev.num_transducers()))
            .collect();
        self.is_open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), LinkError> {
        self.is_open = false;
        Ok(())
    }

    fn send(&mut self, tx: &TxDatagram) -> Result<bool, LinkError> {
        if !self.is_open {
            return Ok(false);
        }
        self.cpus.iter_mut().for_each(|cpu| cpu.send(tx));
        Ok(true)
    }

    fn receive(&mut self, rx: &mut RxDatagram) -> Result<bool, LinkError> {
        if !self.is_open {
            return Ok(false);
        }
        self.cpus
            .iter()
            .zip(rx.iter_mut())
            .for_each(|(cpu, r)| *r = cpu.rx());
        Ok(true)
    }

    fn is_open(&self) -> bool {
        self.is_open
    }
}
