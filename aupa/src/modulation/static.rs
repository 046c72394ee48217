use super::{Modulation, DEFAULT_SAMPLING_FREQ_DIV};
use crate::error::AUPAError;

/// Without modulation
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Static {
    amp: f64,
}

impl Static {
    pub const fn new() -> Self {
        Self { amp: 1.0 }
    }

    pub const fn with_amp(amp: f64) -> Self {
        Self { amp }
    }

    pub const fn amp(&self) -> f64 {
        self.amp
    }
}

impl Default for Static {
    fn default() -> Self {
        Self::new()
    }
}

impl Modulation for Static {
    fn calc(&self) -> Result<Vec<f64>, AUPAError> {
        Ok(vec![self.amp; 2])
    }

    fn sampling_frequency_division(&self) -> u32 {
        DEFAULT_SAMPLING_FREQ_DIV
    }
}
