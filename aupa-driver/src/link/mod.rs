mod error;

pub use error::LinkError;

use std::time::{Duration, Instant};

use crate::{
    cpu::{RxDatagram, TxDatagram},
    error::AUPADriverError,
    geometry::Geometry,
};

/// Interface to the devices
pub trait Link: Send {
    /// Open the link for the given geometry
    fn open(&mut self, geometry: &Geometry) -> Result<(), LinkError>;
    /// Close the link
    fn close(&mut self) -> Result<(), LinkError>;
    /// Send a frame to the devices
    fn send(&mut self, tx: &TxDatagram) -> Result<bool, LinkError>;
    /// Receive the status of the devices
    fn receive(&mut self, rx: &mut RxDatagram) -> Result<bool, LinkError>;
    /// Check if the link is open
    #[must_use]
    fn is_open(&self) -> bool;
}

impl Link for Box<dyn Link> {
    fn open(&mut self, geometry: &Geometry) -> Result<(), LinkError> {
        self.as_mut().open(geometry)
    }

    fn close(&mut self) -> Result<(), LinkError> {
        self.as_mut().close()
    }

    fn send(&mut self, tx: &TxDatagram) -> Result<bool, LinkError> {
        self.as_mut().send(tx)
    }

    fn receive(&mut self, rx: &mut RxDatagram) -> Result<bool, LinkError> {
        self.as_mut().receive(rx)
    }

    fn is_open(&self) -> bool {
        self.as_ref().is_open()
    }
}

/// Send `tx` and wait until every device has consumed it
///
/// With a zero `timeout` the status is received once and no wait is performed.
/// Otherwise `sleep` is called with `interval` between two polls.
pub fn send_receive<L: Link + ?Sized>(
    link: &mut L,
    tx: &TxDatagram,
    rx: &mut RxDatagram,
    interval: Duration,
    timeout: Duration,
    sleep: impl FnMut(Duration),
) -> Result<bool, AUPADriverError> {
    if !link.is_open() {
        return Err(AUPADriverError::LinkClosed);
    }
    let header = tx.header();
    tracing::trace!(
        "send: msg_id = {:#04X}, cpu_flag = {:?}, fpga_flag = {:?}, size = {}, bodies = {}",
        header.msg_id,
        header.cpu_flag,
        header.fpga_flag,
        header.size,
        tx.num_bodies()
    );
    if !link.send(tx)? {
        tracing::debug!("link rejected frame {:#04X}", header.msg_id);
        return Ok(false);
    }
    if timeout.is_zero() {
        return Ok(link.receive(rx)?);
    }
    wait_msg_processed(link, tx.header().msg_id, rx, interval, timeout, sleep)
}

/// Poll the status until every device echoes `msg_id` or `timeout` elapses
pub fn wait_msg_processed<L: Link + ?Sized>(
    link: &mut L,
    msg_id: u8,
    rx: &mut RxDatagram,
    interval: Duration,
    timeout: Duration,
    mut sleep: impl FnMut(Duration),
) -> Result<bool, AUPADriverError> {
    let start = Instant::now();
    loop {
        if !link.is_open() {
            return Err(AUPADriverError::LinkClosed);
        }
        if link.receive(rx)? && rx.is_msg_processed(msg_id) {
            return Ok(true);
        }
        if start.elapsed() > timeout {
            tracing::debug!(
                "frame {:#04X} not processed: {:?}",
                msg_id,
                rx.iter().map(|r| r.msg_id).collect::<Vec<_>>()
            );
            return Ok(false);
        }
        sleep(interval);
    }
}
