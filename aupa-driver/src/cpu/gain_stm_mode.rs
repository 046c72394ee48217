/// Layout of the frames of a GainSTM
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GainSTMMode {
    /// Phase and duty of every transducer
    #[default]
    PhaseDutyFull = 0x0001,
    /// Phase of every transducer, duty fixed at the maximum
    PhaseFull = 0x0002,
}

impl GainSTMMode {
    pub fn from_u16(v: u16) -> Option<Self> {
        match v {
            0x0001 => Some(Self::PhaseDutyFull),
            0x0002 => Some(Self::PhaseFull),
            _ => None,
        }
    }
}
