use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use super::LEGACY_CYCLE;

/// Quantize a normalized value into firmware units of the given cycle
///
/// The result is `round(value * cycle) mod cycle`, so it always lies in `[0, cycle)`.
pub fn quantize(value: f64, cycle: u16) -> u16 {
    let cycle = cycle as i64;
    ((value * cycle as f64).round() as i64).rem_euclid(cycle) as u16
}

/// Drive of a transducer, independent of the firmware resolution
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Drive {
    /// Phase as a fraction of the ultrasound period
    pub phase: f64,
    /// Duty ratio, at most 0.5
    pub duty: f64,
}

impl Drive {
    pub const fn new(phase: f64, duty: f64) -> Self {
        Self { phase, duty }
    }

    pub const fn null() -> Self {
        Self {
            phase: 0.,
            duty: 0.,
        }
    }

    /// Phase in firmware units of `cycle`
    pub fn phase_word(&self, cycle: u16) -> u16 {
        quantize(self.phase, cycle)
    }

    /// Duty in firmware units of `cycle`
    pub fn duty_word(&self, cycle: u16) -> u16 {
        quantize(self.duty, cycle)
    }

    /// Both values packed into one legacy mode word
    pub fn legacy(&self) -> LegacyDrive {
        LegacyDrive {
            phase: quantize(self.phase, LEGACY_CYCLE) as u8,
            duty: quantize(self.duty, LEGACY_CYCLE) as u8,
        }
    }
}

/// Body word of legacy mode: phase in the low byte, duty in the high byte
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoBytes, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct LegacyDrive {
    pub phase: u8,
    pub duty: u8,
}

impl LegacyDrive {
    pub fn to_word(self) -> u16 {
        u16::from_le_bytes([self.phase, self.duty])
    }

    pub fn from_word(word: u16) -> Self {
        let [phase, duty] = word.to_le_bytes();
        Self { phase, duty }
    }
}

#[cfg(test)]
impl rand::distr::Distribution<Drive> for rand::distr::StandardUniform {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Drive {
        Drive::new(rng.random_range(0.0..1.0), rng.random_range(0.0..=0.5))
    }
}
