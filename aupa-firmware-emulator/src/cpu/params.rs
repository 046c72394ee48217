use aupa_driver::firmware_version::FirmwareInfo;

pub const CPU_VERSION_MAJOR: u8 = FirmwareInfo::LATEST_VERSION_NUM_MAJOR;
pub const CPU_VERSION_MINOR: u8 = FirmwareInfo::LATEST_VERSION_NUM_MINOR;
pub const FPGA_VERSION_MAJOR: u8 = FirmwareInfo::LATEST_VERSION_NUM_MAJOR;
pub const FPGA_VERSION_MINOR: u8 = FirmwareInfo::LATEST_VERSION_NUM_MINOR;
pub const FPGA_FUNCTION_BITS: u8 = FirmwareInfo::ENABLED_EMULATOR_BIT;

/// Initial value of the last message id, so that the first frame is never skipped
pub const MSG_ID_INIT: u8 = 0xFF;
