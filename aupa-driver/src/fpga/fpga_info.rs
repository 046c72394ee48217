const THERMAL_ASSERT_BIT: u8 = 1 << 0;

/// FPGA status reported in the ack byte while reading FPGA info is enabled
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FPGAInfo {
    info: u8,
}

impl FPGAInfo {
    pub const fn new(info: u8) -> Self {
        Self { info }
    }

    /// Check if the thermal sensor is asserted
    pub const fn is_thermal_assert(&self) -> bool {
        (self.info & THERMAL_ASSERT_BIT) != 0
    }

    pub const fn info(&self) -> u8 {
        self.info
    }
}

impl std::fmt::Display for FPGAInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Thermal assert = {}", self.is_thermal_assert())
    }
}
