mod builder;
pub mod sleep;

use std::time::{Duration, Instant};

use aupa_driver::{
    cpu::{FPGAControlFlags, MsgId, RxDatagram, TxDatagram},
    error::AUPADriverError,
    firmware_version::FirmwareInfo,
    fpga::FPGAInfo,
    geometry::{Geometry, IntoDevice},
    link::{send_receive, Link},
    operation::{FirmwareInfoOp, FirmwareInfoType, Mode, NullBody, Operation},
};
use itertools::Itertools;

use crate::{
    datagram::{Clear, Datagram, Silencer},
    error::{AUPAError, ReadFirmwareInfoState},
    gain::Null,
    link::Nop,
};

pub use builder::ControllerBuilder;
use sleep::Sleep;

/// Owner of the geometry, the link and the frame buffers
///
/// Every command is streamed through one reused [`TxDatagram`].
#[derive(getset::Getters, getset::MutGetters, getset::CopyGetters)]
pub struct Controller<L: Link> {
    #[getset(get = "pub", get_mut = "pub")]
    link: L,
    #[getset(get = "pub", get_mut = "pub")]
    geometry: Geometry,
    tx: TxDatagram,
    rx: RxDatagram,
    msg_id: MsgId,
    #[getset(get_copy = "pub")]
    mode: Mode,
    #[getset(get_copy = "pub")]
    send_interval: Duration,
    #[getset(get_copy = "pub")]
    receive_interval: Duration,
    #[getset(get_copy = "pub")]
    timeout: Duration,
    sleeper: Box<dyn Sleep>,
    #[getset(get_copy = "pub")]
    force_fan: bool,
    #[getset(get_copy = "pub")]
    reads_fpga_info: bool,
}

impl Controller<Nop> {
    pub fn builder<D: IntoDevice, F: IntoIterator<Item = D>>(iter: F) -> ControllerBuilder {
        ControllerBuilder::new(iter)
    }
}

impl<L: Link> Controller<L> {
    /// Drive the fan at full speed regardless of the temperature
    pub fn set_force_fan(&mut self, force_fan: bool) {
        self.force_fan = force_fan;
    }

    /// Request the FPGA info in the ack byte of every frame
    pub fn set_reads_fpga_info(&mut self, reads_fpga_info: bool) {
        self.reads_fpga_info = reads_fpga_info;
    }

    /// Send a command
    ///
    /// Returns `Ok(false)` if the link failed or the devices did not consume every
    /// frame before the timeout. Validation errors are returned as `Err` and abort
    /// the command; the devices may then hold a partially written state.
    #[tracing::instrument(skip(self, s))]
    pub fn send<D: Datagram>(&mut self, s: D) -> Result<bool, AUPAError> {
        let timeout = s.timeout().unwrap_or(self.timeout);
        let (mut op1, mut op2) = s.operation(&self.geometry, self.mode)?;
        self.send_impl(&mut op1, &mut op2, timeout)
    }

    pub(crate) fn send_impl(
        &mut self,
        op1: &mut impl Operation,
        op2: &mut impl Operation,
        timeout: Duration,
    ) -> Result<bool, AUPAError> {
        op1.init();
        op2.init();

        let deadline = Instant::now() + timeout;
        loop {
            let start = Instant::now();
            let remaining = deadline.saturating_duration_since(start);
            if !timeout.is_zero() && remaining.is_zero() {
                tracing::warn!("command timed out after {:?}", timeout);
                return Ok(false);
            }

            self.msg_id.increment();
            let header = self.tx.header_mut();
            header.msg_id = self.msg_id.get();
            header
                .fpga_flag
                .set(FPGAControlFlags::FORCE_FAN, self.force_fan);
            header
                .fpga_flag
                .set(FPGAControlFlags::READS_FPGA_INFO, self.reads_fpga_info);

            op1.pack(&mut self.tx)?;
            op2.pack(&mut self.tx)?;

            let sleeper = &self.sleeper;
            match send_receive(
                &mut self.link,
                &self.tx,
                &mut self.rx,
                self.receive_interval,
                remaining,
                |d| sleeper.sleep_until(Instant::now() + d),
            ) {
                Ok(true) => {}
                Ok(false) => {
                    tracing::warn!("frame {:#04X} was not processed", self.tx.header().msg_id);
                    return Ok(false);
                }
                Err(AUPADriverError::Link(e)) => {
                    tracing::error!("link error: {}", e);
                    return Ok(false);
                }
                Err(e) => return Err(e.into()),
            }

            tracing::trace!(
                "recv: {}",
                self.rx.iter().format_with(", ", |r, f| f(&format_args!(
                    "({:#04X}, {:#04X})",
                    r.msg_id, r.ack
                )))
            );

            if timeout.is_zero() || (op1.is_finished() && op2.is_finished()) {
                return Ok(true);
            }

            self.sleeper.sleep_until(start + self.send_interval);
        }
    }

    /// Stop the output: default silencer, then a null gain
    pub fn stop(&mut self) -> Result<bool, AUPAError> {
        let silencer = self.send(Silencer::default())?;
        let null = self.send(Null::new())?;
        Ok(silencer && null)
    }

    /// Stop the output, clear the devices and close the link
    pub fn close(&mut self) -> Result<bool, AUPAError> {
        if !self.link.is_open() {
            return Ok(true);
        }
        tracing::debug!("close");
        let stop = self.stop()?;
        let clear = self.send(Clear::new())?;
        self.link.close()?;
        Ok(stop && clear)
    }

    /// Decode the FPGA info of every device from the last acks
    ///
    /// The devices report it only while [`Controller::reads_fpga_info`] is set.
    pub fn fpga_info(&mut self) -> Result<Vec<FPGAInfo>, AUPAError> {
        if !self.link.receive(&mut self.rx)? {
            return Err(AUPAError::ReadFPGAInfoFailed);
        }
        Ok(self.rx.iter().map(|r| FPGAInfo::new(r.ack)).collect())
    }

    fn fetch_firmware_info(&mut self, ty: FirmwareInfoType) -> Result<Vec<u8>, AUPAError> {
        let timeout = self.timeout.max(aupa_driver::defined::DEFAULT_TIMEOUT);
        let processed = self.send_impl(
            &mut FirmwareInfoOp::new(ty),
            &mut NullBody::default(),
            timeout,
        )?;
        if !processed || !self.rx.is_msg_processed(ty.msg_id()) {
            return Err(AUPAError::ReadFirmwareInfoFailed(ReadFirmwareInfoState(
                self.rx.iter().map(|r| r.msg_id == ty.msg_id()).collect(),
            )));
        }
        Ok(self.rx.iter().map(|r| r.ack).collect())
    }

    /// Read the firmware versions of every device
    pub fn firmware_infos(&mut self) -> Result<Vec<FirmwareInfo>, AUPAError> {
        let cpu_major = self.fetch_firmware_info(FirmwareInfoType::CPUVersionMajor)?;
        let cpu_minor = self.fetch_firmware_info(FirmwareInfoType::CPUVersionMinor)?;
        let fpga_major = self.fetch_firmware_info(FirmwareInfoType::FPGAVersionMajor)?;
        let fpga_minor = self.fetch_firmware_info(FirmwareInfoType::FPGAVersionMinor)?;
        let fpga_functions = self.fetch_firmware_info(FirmwareInfoType::FPGAFunctions)?;

        Ok(self
            .geometry
            .iter()
            .map(|dev| {
                let i = dev.idx();
                FirmwareInfo::new(
                    i,
                    cpu_major[i],
                    cpu_minor[i],
                    fpga_major[i],
                    fpga_minor[i],
                    fpga_functions[i],
                )
            })
            .collect())
    }
}

impl<L: Link> Drop for Controller<L> {
    fn drop(&mut self) {
        if !self.link.is_open() {
            return;
        }
        if let Err(e) = self.close() {
            tracing::error!("failed to close: {}", e);
        }
    }
}
