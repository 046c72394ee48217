use std::ops::{Deref, DerefMut};

use aupa_driver::{
    cpu::{RxDatagram, TxDatagram},
    geometry::Geometry,
    link::{Link, LinkError},
};
use aupa_firmware_emulator::CPUEmulator;

/// Link to emulated devices that exposes their state, for testing
///
/// The link can be broken down to simulate a transport failure.
#[derive(Default)]
pub struct Audit {
    is_open: bool,
    cpus: Vec<CPUEmulator>,
    broken: bool,
    frames: usize,
}

impl Deref for Audit {
    type Target = [CPUEmulator];

    fn deref(&self) -> &Self::Target {
        &self.cpus
    }
}

impl DerefMut for Audit {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.cpus
    }
}

impl Audit {
    pub const fn new() -> Self {
        Self {
            is_open: false,
            cpus: Vec::new(),
            broken: false,
            frames: 0,
        }
    }

    pub fn emulators(&self) -> &[CPUEmulator] {
        &self.cpus
    }

    pub fn emulators_mut(&mut self) -> &mut [CPUEmulator] {
        &mut self.cpus
    }

    pub fn break_down(&mut self) {
        self.broken = true;
    }

    pub fn repair(&mut self) {
        self.broken = false;
    }

    pub fn is_broken(&self) -> bool {
        self.broken
    }

    /// Number of frames sent since the link was opened
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Link for Audit {
    fn open(&mut self, geometry: &Geometry) -> Result<(), LinkError> {
        self.cpus = geometry
            .iter()
            .map(|dev| CPUEmulator::new(dev.idx(), dev.num_transducers()))
            .collect();
        self.frames = 0;
        self.is_open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), LinkError> {
        self.is_open = false;
        Ok(())
    }

    fn send(&mut self, tx: &TxDatagram) -> Result<bool, LinkError> {
        if self.broken {
            return Err(LinkError::new("broken"));
        }
        self.cpus.iter_mut().for_each(|cpu| cpu.send(tx));
        self.frames += 1;
        Ok(true)
    }

    fn receive(&mut self, rx: &mut RxDatagram) -> Result<bool, LinkError> {
        if self.broken {
            return Err(LinkError::new("broken"));
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
