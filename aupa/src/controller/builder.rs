use std::time::Duration;

use aupa_driver::{
    cpu::{MsgId, RxDatagram, TxDatagram},
    defined::DEFAULT_TIMEOUT,
    geometry::{Device, Geometry, IntoDevice},
    link::Link,
    operation::Mode,
};

use super::{
    sleep::{Sleep, StdSleeper},
    Controller,
};
use crate::{
    datagram::{Clear, Synchronize},
    error::AUPAError,
};

/// Builder for [`Controller`]
#[derive(Debug)]
pub struct ControllerBuilder {
    devices: Vec<Device>,
    mode: Mode,
    send_interval: Duration,
    receive_interval: Duration,
    timeout: Duration,
    sleeper: Box<dyn Sleep>,
    force_fan: bool,
    reads_fpga_info: bool,
}

impl ControllerBuilder {
    pub(crate) fn new<D: IntoDevice, F: IntoIterator<Item = D>>(iter: F) -> Self {
        Self {
            devices: iter
                .into_iter()
                .enumerate()
                .map(|(i, d)| d.into_device(i))
                .collect(),
            mode: Mode::default(),
            send_interval: Duration::from_millis(1),
            receive_interval: Duration::from_millis(1),
            timeout: DEFAULT_TIMEOUT,
            sleeper: Box::new(StdSleeper),
            force_fan: false,
            reads_fpga_info: false,
        }
    }

    /// Set the firmware resolution used for gains
    pub fn with_mode(self, mode: Mode) -> Self {
        Self { mode, ..self }
    }

    /// Set the interval between two frames of one command
    pub fn with_send_interval(self, send_interval: Duration) -> Self {
        Self {
            send_interval,
            ..self
        }
    }

    /// Set the interval of polling the acks
    pub fn with_receive_interval(self, receive_interval: Duration) -> Self {
        Self {
            receive_interval,
            ..self
        }
    }

    /// Set the default timeout of a command
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    pub fn with_sleeper<S: Sleep + 'static>(self, sleeper: S) -> Self {
        Self {
            sleeper: Box::new(sleeper),
            ..self
        }
    }

    pub fn with_force_fan(self, force_fan: bool) -> Self {
        Self { force_fan, ..self }
    }

    pub fn with_reads_fpga_info(self, reads_fpga_info: bool) -> Self {
        Self {
            reads_fpga_info,
            ..self
        }
    }

    /// Open the link, then clear and synchronize the devices
    #[tracing::instrument(skip(self, link))]
    pub fn open<L: Link>(self, mut link: L) -> Result<Controller<L>, AUPAError> {
        let geometry = Geometry::new(self.devices);
        tracing::debug!(
            "open: {} devices, {} transducers, {:?} mode",
            geometry.num_devices(),
            geometry.num_transducers(),
            self.mode
        );
        link.open(&geometry)?;

        let mut cnt = Controller {
            link,
            tx: TxDatagram::new(&geometry.device_map()),
            rx: RxDatagram::new(geometry.num_devices()),
            geometry,
            msg_id: MsgId::default(),
            mode: self.mode,
            send_interval: self.send_interval,
            receive_interval: self.receive_interval,
            timeout: self.timeout,
            sleeper: self.sleeper,
            force_fan: self.force_fan,
            reads_fpga_info: self.reads_fpga_info,
        };
        cnt.send(Clear::new())?;
        cnt.send(Synchronize::new())?;
        Ok(cnt)
    }
}
