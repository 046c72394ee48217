use std::time::Duration;

use aupa_driver::{
    fpga::{SILENCER_CYCLE_DEFAULT, SILENCER_STEP_DEFAULT},
    geometry::Geometry,
    operation::{ClearOp, ConfigSilencerOp, Mode, NullBody, NullHeader, Operation, SyncOp},
};

use crate::error::AUPAError;

/// A command that a [`Controller`](crate::Controller) can send
///
/// A command is a pair of a header operation and a body operation, streamed
/// together until both are finished.
pub trait Datagram {
    type O1: Operation;
    type O2: Operation;

    fn operation(self, geometry: &Geometry, mode: Mode) -> Result<(Self::O1, Self::O2), AUPAError>;

    /// Timeout of this command, `None` to use the default of the controller
    fn timeout(&self) -> Option<Duration> {
        None
    }
}

/// A command that only uses the header, and can be combined with a [`BodyDatagram`]
pub trait HeaderDatagram: Datagram<O2 = NullBody> {}

/// A command that only uses the body, and can be combined with a [`HeaderDatagram`]
pub trait BodyDatagram: Datagram<O1 = NullHeader> {}

impl<H: HeaderDatagram, B: BodyDatagram> Datagram for (H, B) {
    type O1 = H::O1;
    type O2 = B::O2;

    fn operation(self, geometry: &Geometry, mode: Mode) -> Result<(Self::O1, Self::O2), AUPAError> {
        let (h, _) = self.0.operation(geometry, mode)?;
        let (_, b) = self.1.operation(geometry, mode)?;
        Ok((h, b))
    }

    fn timeout(&self) -> Option<Duration> {
        self.0.timeout().max(self.1.timeout())
    }
}

/// A command with an explicit timeout
#[derive(Debug, Clone, Copy)]
pub struct DatagramWithTimeout<D: Datagram> {
    datagram: D,
    timeout: Duration,
}

impl<D: Datagram> Datagram for DatagramWithTimeout<D> {
    type O1 = D::O1;
    type O2 = D::O2;

    fn operation(self, geometry: &Geometry, mode: Mode) -> Result<(Self::O1, Self::O2), AUPAError> {
        self.datagram.operation(geometry, mode)
    }

    fn timeout(&self) -> Option<Duration> {
        Some(self.timeout)
    }
}

impl<D: HeaderDatagram> HeaderDatagram for DatagramWithTimeout<D> {}
impl<D: BodyDatagram> BodyDatagram for DatagramWithTimeout<D> {}

pub trait IntoDatagramWithTimeout<D: Datagram> {
    /// Override the timeout of the command
    ///
    /// `Duration::ZERO` sends exactly one frame and does not wait for the devices.
    fn with_timeout(self, timeout: Duration) -> DatagramWithTimeout<D>;
}

impl<D: Datagram> IntoDatagramWithTimeout<D> for D {
    fn with_timeout(self, timeout: Duration) -> DatagramWithTimeout<D> {
        DatagramWithTimeout {
            datagram: self,
            timeout,
        }
    }
}

/// Reset the firmware state of every device
#[derive(Debug, Clone, Copy, Default)]
pub struct Clear {}

impl Clear {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Datagram for Clear {
    type O1 = ClearOp;
    type O2 = NullBody;

    fn operation(self, _: &Geometry, _: Mode) -> Result<(Self::O1, Self::O2), AUPAError> {
        Ok((ClearOp::default(), NullBody::default()))
    }
}

/// Synchronize the devices and configure the cycle of every transducer
///
/// In legacy mode every transducer runs with the default cycle, otherwise the
/// cycles of the geometry are sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Synchronize {}

impl Synchronize {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Datagram for Synchronize {
    type O1 = SyncOp;
    type O2 = NullBody;

    fn operation(self, geometry: &Geometry, mode: Mode) -> Result<(Self::O1, Self::O2), AUPAError> {
        let op = match mode {
            Mode::Legacy => SyncOp::legacy(),
            Mode::Normal | Mode::NormalPhase => SyncOp::normal(geometry.cycles()),
        };
        Ok((op, NullBody::default()))
    }
}

/// Configure the silencer of every device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Silencer {
    cycle: u16,
    step: u16,
}

impl Silencer {
    pub const fn new(cycle: u16, step: u16) -> Self {
        Self { cycle, step }
    }

    pub const fn cycle(&self) -> u16 {
        self.cycle
    }

    pub const fn step(&self) -> u16 {
        self.step
    }
}

impl Default for Silencer {
    fn default() -> Self {
        Self::new(SILENCER_CYCLE_DEFAULT, SILENCER_STEP_DEFAULT)
    }
}

impl Datagram for Silencer {
    type O1 = ConfigSilencerOp;
    type O2 = NullBody;

    fn operation(self, _: &Geometry, _: Mode) -> Result<(Self::O1, Self::O2), AUPAError> {
        Ok((ConfigSilencerOp::new(self.cycle, self.step), NullBody::default()))
    }
}

impl HeaderDatagram for Silencer {}
