use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

/// Requests to the CPU firmware, carried in `Header::cpu_flag`
///
/// | bit | name |
/// |---|---|
/// | 0 | `MOD` |
/// | 1 | `MOD_BEGIN` while `MOD` is set, `CONFIG_SILENCER` otherwise |
/// | 2 | `MOD_END` while `MOD` is set, `CONFIG_SYNC` otherwise |
/// | 3 | `WRITE_BODY` |
/// | 4 | `STM_BEGIN` |
/// | 5 | `STM_END` |
/// | 6 | `IS_DUTY` |
#[repr(C)]
#[derive(
    Clone, Copy, PartialEq, Eq, Debug, Default, IntoBytes, FromBytes, Immutable, KnownLayout, Unaligned,
)]
pub struct CPUControlFlags(u8);

bitflags::bitflags! {
    impl CPUControlFlags : u8 {
        const NONE            = 0;
        const MOD             = 1 << 0;
        const MOD_BEGIN       = 1 << 1;
        const MOD_END         = 1 << 2;
        const CONFIG_SILENCER = 1 << 1;
        const CONFIG_SYNC     = 1 << 2;
        const WRITE_BODY      = 1 << 3;
        const STM_BEGIN       = 1 << 4;
        const STM_END         = 1 << 5;
        const IS_DUTY         = 1 << 6;
    }
}

impl CPUControlFlags {
    /// Bits owned by header operations
    pub const HEADER_MASK: Self = Self::MOD.union(Self::MOD_BEGIN).union(Self::MOD_END);
    /// Bits owned by body operations
    pub const BODY_MASK: Self = Self::WRITE_BODY
        .union(Self::STM_BEGIN)
        .union(Self::STM_END)
        .union(Self::IS_DUTY);
}

/// Requests to the FPGA, carried in `Header::fpga_flag`
///
/// | bit | name |
/// |---|---|
/// | 0 | `LEGACY_MODE` |
/// | 2 | `USE_STM_FINISH_IDX` |
/// | 3 | `USE_STM_START_IDX` |
/// | 4 | `FORCE_FAN` |
/// | 5 | `STM_MODE` |
/// | 6 | `STM_GAIN_MODE` |
/// | 7 | `READS_FPGA_INFO` |
#[repr(C)]
#[derive(
    Clone, Copy, PartialEq, Eq, Debug, Default, IntoBytes, FromBytes, Immutable, KnownLayout, Unaligned,
)]
pub struct FPGAControlFlags(u8);

bitflags::bitflags! {
    impl FPGAControlFlags : u8 {
        const NONE               = 0;
        const LEGACY_MODE        = 1 << 0;
        const USE_STM_FINISH_IDX = 1 << 2;
        const USE_STM_START_IDX  = 1 << 3;
        const FORCE_FAN          = 1 << 4;
        const STM_MODE           = 1 << 5;
        const STM_GAIN_MODE      = 1 << 6;
        const READS_FPGA_INFO    = 1 << 7;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size() {
        assert_eq!(1, std::mem::size_of::<CPUControlFlags>());
        assert_eq!(1, std::mem::size_of::<FPGAControlFlags>());
    }

    #[test]
    fn aliased_bits() {
        assert_eq!(CPUControlFlags::MOD_BEGIN.bits(), CPUControlFlags::CONFIG_SILENCER.bits());
        assert_eq!(CPUControlFlags::MOD_END.bits(), CPUControlFlags::CONFIG_SYNC.bits());
        assert!(CPUControlFlags::HEADER_MASK.contains(CPUControlFlags::CONFIG_SYNC));
        assert!(!CPUControlFlags::HEADER_MASK.intersects(CPUControlFlags::BODY_MASK));
    }

    #[rstest::rstest]
    #[test]
    #[case(0x01, FPGAControlFlags::LEGACY_MODE)]
    #[case(0x04, FPGAControlFlags::USE_STM_FINISH_IDX)]
    #[case(0x08, FPGAControlFlags::USE_STM_START_IDX)]
    #[case(0x10, FPGAControlFlags::FORCE_FAN)]
    #[case(0x20, FPGAControlFlags::STM_MODE)]
    #[case(0x40, FPGAControlFlags::STM_GAIN_MODE)]
    #[case(0x80, FPGAControlFlags::READS_FPGA_INFO)]
    fn fpga_bits(#[case] expected: u8, #[case] flag: FPGAControlFlags) {
        assert_eq!(expected, flag.bits());
        assert_eq!(&[expected], flag.as_bytes());
    }
}
