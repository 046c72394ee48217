use super::{Modulation, DEFAULT_SAMPLING_FREQ_DIV};
use crate::error::AUPAError;

/// Modulation with samples given by the user
#[derive(Clone, PartialEq, Debug)]
pub struct Custom {
    buf: Vec<f64>,
    freq_div: u32,
}

impl Custom {
    pub fn new(buf: Vec<f64>) -> Self {
        Self {
            buf,
            freq_div: DEFAULT_SAMPLING_FREQ_DIV,
        }
    }

    pub fn with_sampling_frequency_division(self, freq_div: u32) -> Self {
        Self { freq_div, ..self }
    }

    pub fn buffer(&self) -> &[f64] {
        &self.buf
    }
}

impl Modulation for Custom {
    fn calc(&self) -> Result<Vec<f64>, AUPAError> {
        Ok(self.buf.clone())
    }

    fn sampling_frequency_division(&self) -> u32 {
        self.freq_div
    }
}
