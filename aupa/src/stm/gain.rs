use aupa_driver::{
    geometry::Geometry,
    operation::{stm::GainSTMOp, Mode, NullHeader},
};

use super::freq_div_from_freq;
use crate::{
    datagram::{BodyDatagram, Datagram},
    error::AUPAError,
    gain::{flatten, Gain},
};

/// GainSTM: a sequence of gains played by the firmware
pub struct GainSTM {
    gains: Vec<Box<dyn Gain>>,
    freq: Option<f64>,
    freq_div: u32,
    start_idx: Option<u16>,
    finish_idx: Option<u16>,
}

impl GainSTM {
    /// Play the whole sequence `freq` times per second
    pub fn new(freq: f64) -> Self {
        Self {
            gains: Vec::new(),
            freq: Some(freq),
            freq_div: 0,
            start_idx: None,
            finish_idx: None,
        }
    }

    pub fn from_sampling_frequency_division(freq_div: u32) -> Self {
        Self {
            gains: Vec::new(),
            freq: None,
            freq_div,
            start_idx: None,
            finish_idx: None,
        }
    }

    pub fn add_gain<G: Gain + 'static>(mut self, gain: G) -> Self {
        self.gains.push(Box::new(gain));
        self
    }

    pub fn add_gains_from_iter<G: Gain + 'static>(mut self, iter: impl IntoIterator<Item = G>) -> Self {
        self.gains
            .extend(iter.into_iter().map(|g| Box::new(g) as Box<dyn Gain>));
        self
    }

    pub fn with_start_idx(self, start_idx: Option<u16>) -> Self {
        Self { start_idx, ..self }
    }

    pub fn with_finish_idx(self, finish_idx: Option<u16>) -> Self {
        Self { finish_idx, ..self }
    }

    pub fn gains(&self) -> &[Box<dyn Gain>] {
        &self.gains
    }

    pub fn start_idx(&self) -> Option<u16> {
        self.start_idx
    }

    pub fn finish_idx(&self) -> Option<u16> {
        self.finish_idx
    }

    pub fn sampling_frequency_division(&self) -> u32 {
        match self.freq {
            Some(freq) => freq_div_from_freq(freq, self.gains.len()),
            None => self.freq_div,
        }
    }
}

impl Datagram for GainSTM {
    type O1 = NullHeader;
    type O2 = GainSTMOp;

    fn operation(self, geometry: &Geometry, mode: Mode) -> Result<(Self::O1, Self::O2), AUPAError> {
        let freq_div = self.sampling_frequency_division();
        let frames = self
            .gains
            .iter()
            .map(|g| Ok(flatten(geometry, g.calc(geometry)?)))
            .collect::<Result<Vec<_>, AUPAError>>()?;
        tracing::debug!(
            "GainSTM of {} frames in {:?} mode, freq_div = {}",
            frames.len(),
            mode,
            freq_div
        );
        Ok((
            NullHeader::default(),
            GainSTMOp::new(
                frames,
                geometry.cycles(),
                mode,
                freq_div,
                self.start_idx,
                self.finish_idx,
            ),
        ))
    }
}

impl BodyDatagram for GainSTM {}
