use aupa_driver::{
    defined::DEFAULT_SOUND_SPEED,
    geometry::{Geometry, Vector3},
    operation::{
        stm::{ControlPoint, FocusSTMOp},
        Mode, NullHeader,
    },
};

use super::freq_div_from_freq;
use crate::{
    datagram::{BodyDatagram, Datagram},
    error::AUPAError,
};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Rate {
    Freq(f64),
    FreqDiv(u32),
}

/// FocusSTM: a trajectory of focal points played by the firmware
///
/// Points are given in the global frame and converted into the frame of
/// every device when sent.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusSTM {
    control_points: Vec<ControlPoint>,
    rate: Rate,
    start_idx: Option<u16>,
    finish_idx: Option<u16>,
}

impl FocusSTM {
    /// Play the whole trajectory `freq` times per second
    pub fn new(freq: f64) -> Self {
        Self::with_rate(Rate::Freq(freq))
    }

    pub fn from_sampling_frequency_division(freq_div: u32) -> Self {
        Self::with_rate(Rate::FreqDiv(freq_div))
    }

    fn with_rate(rate: Rate) -> Self {
        Self {
            control_points: Vec::new(),
            rate,
            start_idx: None,
            finish_idx: None,
        }
    }

    pub fn add_focus(mut self, point: Vector3) -> Self {
        self.control_points.push(ControlPoint::new(point, 0));
        self
    }

    /// Add a focus whose duty is right-shifted by `duty_shift`
    pub fn add_focus_with_shift(mut self, point: Vector3, duty_shift: u8) -> Self {
        self.control_points.push(ControlPoint::new(point, duty_shift));
        self
    }

    pub fn add_foci_from_iter(mut self, iter: impl IntoIterator<Item = Vector3>) -> Self {
        self.control_points
            .extend(iter.into_iter().map(|p| ControlPoint::new(p, 0)));
        self
    }

    /// Index at which the playback starts when the STM is switched on
    pub fn with_start_idx(self, start_idx: Option<u16>) -> Self {
        Self { start_idx, ..self }
    }

    /// Index at which the playback stops when the STM is switched off
    pub fn with_finish_idx(self, finish_idx: Option<u16>) -> Self {
        Self { finish_idx, ..self }
    }

    pub fn control_points(&self) -> &[ControlPoint] {
        &self.control_points
    }

    pub fn start_idx(&self) -> Option<u16> {
        self.start_idx
    }

    pub fn finish_idx(&self) -> Option<u16> {
        self.finish_idx
    }

    pub fn sampling_frequency_division(&self) -> u32 {
        match self.rate {
            Rate::Freq(freq) => freq_div_from_freq(freq, self.control_points.len()),
            Rate::FreqDiv(freq_div) => freq_div,
        }
    }
}

impl Datagram for FocusSTM {
    type O1 = NullHeader;
    type O2 = FocusSTMOp;

    fn operation(self, geometry: &Geometry, _: Mode) -> Result<(Self::O1, Self::O2), AUPAError> {
        let freq_div = self.sampling_frequency_division();
        let sound_speed = geometry
            .first()
            .map_or(DEFAULT_SOUND_SPEED, |dev| dev.sound_speed);
        let points = geometry
            .iter()
            .map(|dev| {
                self.control_points
                    .iter()
                    .map(|p| ControlPoint::new(dev.to_local(&p.point), p.duty_shift))
                    .collect()
            })
            .collect();
        tracing::debug!(
            "FocusSTM of {} points, freq_div = {}",
            self.control_points.len(),
            freq_div
        );
        Ok((
            NullHeader::default(),
            FocusSTMOp::new(points, freq_div, sound_speed, self.start_idx, self.finish_idx),
        ))
    }
}

impl BodyDatagram for FocusSTM {}

#[cfg(test)]
mod tests {
    use aupa_driver::{
        aupa_device::AUPA,
        geometry::{IntoDevice, UnitQuaternion},
        operation::Operation,
    };

    use super::*;

    #[test]
    fn freq() {
        let stm = FocusSTM::new(1.).add_foci_from_iter((0..10).map(|_| Vector3::zeros()));
        assert_eq!(16_384_000, stm.sampling_frequency_division());
        assert_eq!(10, stm.control_points().len());
    }

    #[test]
    fn builder() {
        let stm = FocusSTM::from_sampling_frequency_division(4096)
            .add_focus(Vector3::new(1., 2., 3.))
            .add_focus_with_shift(Vector3::new(4., 5., 6.), 3)
            .with_start_idx(Some(1))
            .with_finish_idx(Some(0));
        assert_eq!(4096, stm.sampling_frequency_division());
        assert_eq!(
            &[
                ControlPoint::new(Vector3::new(1., 2., 3.), 0),
                ControlPoint::new(Vector3::new(4., 5., 6.), 3)
            ],
            stm.control_points()
        );
        assert_eq!(Some(1), stm.start_idx());
        assert_eq!(Some(0), stm.finish_idx());
    }

    #[test]
    fn operation() -> anyhow::Result<()> {
        let geometry = Geometry::new(vec![
            AUPA::new(Vector3::zeros(), UnitQuaternion::identity()).into_device(0),
            AUPA::new(Vector3::new(10., 20., 30.), UnitQuaternion::identity()).into_device(1),
        ]);
        let stm = FocusSTM::from_sampling_frequency_division(4096)
            .add_focus(Vector3::new(10., 20., 150.))
            .add_focus(Vector3::new(10., 20., 160.));
        let (_, mut op) = stm.operation(&geometry, Mode::Legacy)?;
        op.init();
        assert!(!op.is_finished());
        Ok(())
    }
}
