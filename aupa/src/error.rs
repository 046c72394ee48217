use aupa_driver::error::AUPADriverError;
use thiserror::Error;

/// Devices that did not answer a firmware info read
#[derive(PartialEq, Eq, Clone)]
pub struct ReadFirmwareInfoState(pub Vec<bool>);

impl std::fmt::Display for ReadFirmwareInfoState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Read firmware info failed: {}",
            self.0
                .iter()
                .enumerate()
                .filter(|(_, &b)| !b)
                .map(|(i, _)| i.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::fmt::Debug for ReadFirmwareInfoState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

#[derive(Error, Debug, PartialEq, Clone)]
pub enum AUPAError {
    #[error("{0}")]
    ReadFirmwareInfoFailed(ReadFirmwareInfoState),
    #[error("Read FPGA info failed")]
    ReadFPGAInfoFailed,
    #[error("{0}")]
    ModulationError(String),
    #[error("{0}")]
    GainError(String),
    #[error("{0}")]
    Driver(#[from] AUPADriverError),
}

impl From<aupa_driver::link::LinkError> for AUPAError {
    fn from(e: aupa_driver::link::LinkError) -> Self {
        AUPAError::Driver(e.into())
    }
}
