pub use crate::{
    controller::{sleep::Sleep, Controller},
    datagram::{Clear, Datagram, IntoDatagramWithTimeout, Silencer, Synchronize},
    error::AUPAError,
    gain::{Focus, Gain, Null, Uniform},
    link::{Audit, Nop},
    modulation::{Modulation, Sine, Static},
    stm::{FocusSTM, GainSTM},
};

pub use aupa_driver::{
    aupa_device::AUPA,
    cpu::GainSTMMode,
    defined::{mm, DEFAULT_SOUND_SPEED, METER, PI},
    error::AUPADriverError,
    firmware_version::FirmwareInfo,
    fpga::{Drive, FPGAInfo},
    geometry::*,
    link::{Link, LinkError},
    operation::Mode,
};
