use std::ops::{Deref, DerefMut};

use crate::defined::DEFAULT_SOUND_SPEED;

use super::{Matrix3, Transducer, UnitQuaternion, Vector3};

#[derive(Clone, Debug)]
pub struct Device {
    idx: usize,
    transducers: Vec<Transducer>,
    pub sound_speed: f64,
    inv: Matrix3,
}

impl Device {
    #[doc(hidden)]
    pub fn new(idx: usize, transducers: Vec<Transducer>) -> Self {
        let inv = Self::inv_rotation(&transducers);
        Self {
            idx,
            transducers,
            sound_speed: DEFAULT_SOUND_SPEED,
            inv,
        }
    }

    fn inv_rotation(transducers: &[Transducer]) -> Matrix3 {
        transducers.first().map_or_else(Matrix3::identity, |tr| {
            Matrix3::from_columns(&[tr.x_direction(), tr.y_direction(), tr.z_direction()])
                .transpose()
        })
    }

    pub const fn idx(&self) -> usize {
        self.idx
    }

    /// Get the number of transducers
    pub fn num_transducers(&self) -> usize {
        self.transducers.len()
    }

    /// Get center position
    pub fn center(&self) -> Vector3 {
        self.transducers
            .iter()
            .map(|tr| tr.position())
            .sum::<Vector3>()
            / self.transducers.len() as f64
    }

    /// Convert a global position into the local frame of the device
    ///
    /// The origin of the local frame is the first transducer.
    pub fn to_local(&self, p: &Vector3) -> Vector3 {
        let origin = self
            .transducers
            .first()
            .map_or_else(Vector3::zeros, |tr| *tr.position());
        self.inv * (p - origin)
    }

    /// Get the firmware cycles of all transducers in the device
    pub fn cycles(&self) -> Vec<u16> {
        self.transducers.iter().map(|tr| tr.cycle()).collect()
    }

    /// Translate all transducers in the device
    pub fn translate(&mut self, t: Vector3) {
        self.affine(t, UnitQuaternion::identity());
    }

    /// Rotate all transducers in the device
    pub fn rotate(&mut self, r: UnitQuaternion) {
        self.affine(Vector3::zeros(), r);
    }

    /// Affine transform
    pub fn affine(&mut self, t: Vector3, r: UnitQuaternion) {
        self.transducers.iter_mut().for_each(|tr| tr.affine(t, r));
        self.inv = Self::inv_rotation(&self.transducers);
    }

    /// Set speed of sound from temperature
    /// This is equivalent to `set_sound_speed_from_temp_with(temp, 1.4, 8.314463, 28.9647e-3)`
    ///
    /// # Arguments
    ///
    /// * `temp` - Temperature in Celsius
    ///
    pub fn set_sound_speed_from_temp(&mut self, temp: f64) {
        self.set_sound_speed_from_temp_with(temp, 1.4, 8.314_463, 28.9647e-3);
    }

    /// Set speed of sound from temperature with air parameter
    ///
    /// # Arguments
    ///
    /// * `temp` - Temperature in Celsius
    /// * `k` - Ratio of specific heat
    /// * `r` - Gas constant
    /// * `m` - Molar mass
    ///
    pub fn set_sound_speed_from_temp_with(&mut self, temp: f64, k: f64, r: f64, m: f64) {
        self.sound_speed = (k * r * (273.15 + temp) / m).sqrt() * crate::defined::METER;
    }
}

impl Deref for Device {
    type Target = [Transducer];

    fn deref(&self) -> &Self::Target {
        &self.transducers
    }
}

impl DerefMut for Device {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.transducers
    }
}

impl<'a> IntoIterator for &'a Device {
    type Item = &'a Transducer;
    type IntoIter = std::slice::Iter<'a, Transducer>;

    fn into_iter(self) -> Self::IntoIter {
        self.transducers.iter()
    }
}

/// A transducer layout that can be placed as a device of a geometry
pub trait IntoDevice {
    fn into_device(self, dev_idx: usize) -> Device;
}
