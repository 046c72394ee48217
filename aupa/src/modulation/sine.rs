use aupa_driver::defined::PI;

use super::{Modulation, DEFAULT_SAMPLING_FREQ_DIV};
use crate::error::AUPAError;

/// Sine wave modulation
///
/// The amplitude is `amp / 2 * sin(2π * freq * t + phase) + offset`. One period
/// is sampled, so the frequency is rounded to the nearest divisor of the
/// sampling frequency.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Sine {
    freq: f64,
    amp: f64,
    phase: f64,
    offset: f64,
    freq_div: u32,
}

impl Sine {
    /// `freq` is the frequency of the wave in Hz
    pub const fn new(freq: f64) -> Self {
        Self {
            freq,
            amp: 1.,
            phase: 0.,
            offset: 0.5,
            freq_div: DEFAULT_SAMPLING_FREQ_DIV,
        }
    }

    /// Set the peak-to-peak amplitude
    pub const fn with_amp(self, amp: f64) -> Self {
        Self { amp, ..self }
    }

    /// Set the phase in radians
    pub const fn with_phase(self, phase: f64) -> Self {
        Self { phase, ..self }
    }

    pub const fn with_offset(self, offset: f64) -> Self {
        Self { offset, ..self }
    }

    pub const fn with_sampling_frequency_division(self, freq_div: u32) -> Self {
        Self { freq_div, ..self }
    }

    pub const fn freq(&self) -> f64 {
        self.freq
    }

    pub const fn amp(&self) -> f64 {
        self.amp
    }

    pub const fn phase(&self) -> f64 {
        self.phase
    }

    pub const fn offset(&self) -> f64 {
        self.offset
    }
}

impl Modulation for Sine {
    fn calc(&self) -> Result<Vec<f64>, AUPAError> {
        let sf = self.sampling_frequency();
        if !(self.freq > 0. && self.freq <= sf / 2.) {
            return Err(AUPAError::ModulationError(format!(
                "Frequency ({} Hz) is out of range ((0, {}] Hz)",
                self.freq,
                sf / 2.
            )));
        }
        let n = (sf / self.freq).round() as usize;
        Ok((0..n)
            .map(|i| {
                self.amp / 2. * (2. * PI * i as f64 / n as f64 + self.phase).sin() + self.offset
            })
            .collect())
    }

    fn sampling_frequency_division(&self) -> u32 {
        self.freq_div
    }
}
