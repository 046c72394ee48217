use std::fmt;

/// Version information reported by the firmware of one device
#[derive(Debug, Clone, Copy, PartialEq, Eq, getset::CopyGetters)]
pub struct FirmwareInfo {
    #[getset(get_copy = "pub")]
    idx: usize,
    #[getset(get_copy = "pub")]
    cpu_version_number_major: u8,
    #[getset(get_copy = "pub")]
    cpu_version_number_minor: u8,
    #[getset(get_copy = "pub")]
    fpga_version_number_major: u8,
    #[getset(get_copy = "pub")]
    fpga_version_number_minor: u8,
    #[getset(get_copy = "pub")]
    fpga_function_bits: u8,
}

impl FirmwareInfo {
    pub const LATEST_VERSION_NUM_MAJOR: u8 = 0x89;
    pub const LATEST_VERSION_NUM_MINOR: u8 = 0x00;

    pub const ENABLED_EMULATOR_BIT: u8 = 1 << 7;

    #[doc(hidden)]
    pub const fn new(
        idx: usize,
        cpu_version_number_major: u8,
        cpu_version_number_minor: u8,
        fpga_version_number_major: u8,
        fpga_version_number_minor: u8,
        fpga_function_bits: u8,
    ) -> Self {
        Self {
            idx,
            cpu_version_number_major,
            cpu_version_number_minor,
            fpga_version_number_major,
            fpga_version_number_minor,
            fpga_function_bits,
        }
    }

    pub fn cpu_version(&self) -> String {
        Self::firmware_version_map(self.cpu_version_number_major, self.cpu_version_number_minor)
    }

    pub fn fpga_version(&self) -> String {
        Self::firmware_version_map(
            self.fpga_version_number_major,
            self.fpga_version_number_minor,
        )
    }

    /// Check if the device is a software emulator
    pub const fn is_emulator(&self) -> bool {
        (self.fpga_function_bits & Self::ENABLED_EMULATOR_BIT) == Self::ENABLED_EMULATOR_BIT
    }

    fn firmware_version_map(major: u8, minor: u8) -> String {
        match major {
            0 => "older than v0.4".to_string(),
            0x01..=0x06 => format!("v0.{}", major + 3),
            0x0A..=0x15 => format!("v1.{}", major - 0x0A),
            0x80..=0x89 => format!("v2.{}.{}", major - 0x80, minor),
            _ => format!("unknown ({major})"),
        }
    }

    pub fn latest_version() -> String {
        Self::firmware_version_map(
            Self::LATEST_VERSION_NUM_MAJOR,
            Self::LATEST_VERSION_NUM_MINOR,
        )
    }
}

impl fmt::Display for FirmwareInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: CPU = {}, FPGA = {}{}",
            self.idx,
            self.cpu_version(),
            self.fpga_version(),
            if self.is_emulator() {
                " [Emulator]"
            } else {
                ""
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[test]
    #[case("older than v0.4", 0)]
    #[case("v0.4", 1)]
    #[case("v0.9", 6)]
    #[case("unknown (7)", 7)]
    #[case("unknown (9)", 9)]
    #[case("v1.0", 10)]
    #[case("v1.11", 21)]
    #[case("unknown (22)", 22)]
    #[case("v2.0.0", 128)]
    #[case("v2.9.0", 137)]
    #[case("unknown (138)", 138)]
    fn firmware_version(#[case] expected: &str, #[case] version: u8) {
        let info = FirmwareInfo::new(0, version, 0, version, 0, 0);
        assert_eq!(expected, info.cpu_version());
        assert_eq!(expected, info.fpga_version());
    }

    #[test]
    fn minor_version() {
        let info = FirmwareInfo::new(0, 0x82, 1, 0x83, 2, 0);
        assert_eq!("v2.2.1", info.cpu_version());
        assert_eq!("v2.3.2", info.fpga_version());
    }

    #[test]
    fn latest_firmware_version() {
        assert_eq!("v2.9.0", FirmwareInfo::latest_version());
    }

    #[test]
    fn is_emulator() {
        assert!(FirmwareInfo::new(0, 0, 0, 0, 0, FirmwareInfo::ENABLED_EMULATOR_BIT).is_emulator());
        assert!(!FirmwareInfo::new(0, 0, 0, 0, 0, 0).is_emulator());
    }

    #[rstest::rstest]
    #[test]
    #[case("0: CPU = v2.9.0, FPGA = v2.9.0 [Emulator]", 0x80)]
    #[case("0: CPU = v2.9.0, FPGA = v2.9.0", 0x00)]
    fn display(#[case] expected: &str, #[case] bits: u8) {
        let info = FirmwareInfo::new(0, 0x89, 0, 0x89, 0, bits);
        assert_eq!(expected, info.to_string());
        assert_eq!(0, info.idx());
        assert_eq!(bits, info.fpga_function_bits());
    }
}
