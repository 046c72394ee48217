mod device;
mod transducer;

pub type Vector3 = nalgebra::Vector3<f64>;
pub type Vector4 = nalgebra::Vector4<f64>;
pub type Quaternion = nalgebra::Quaternion<f64>;
pub type UnitQuaternion = nalgebra::UnitQuaternion<f64>;
pub type Matrix3 = nalgebra::Matrix3<f64>;
pub type Matrix4 = nalgebra::Matrix4<f64>;

pub use device::*;
pub use transducer::*;

use std::ops::{Deref, DerefMut};

/// Ordered set of devices driven by one controller
pub struct Geometry {
    devices: Vec<Device>,
}

impl Geometry {
    #[doc(hidden)]
    pub const fn new(devices: Vec<Device>) -> Geometry {
        Self { devices }
    }

    /// Get the number of devices
    pub fn num_devices(&self) -> usize {
        self.devices.len()
    }

    /// Get the number of total transducers
    pub fn num_transducers(&self) -> usize {
        self.devices.iter().map(|dev| dev.num_transducers()).sum()
    }

    /// Get the number of transducers of each device, in device order
    ///
    /// This determines the shape of the body part of every datagram.
    pub fn device_map(&self) -> Vec<usize> {
        self.devices.iter().map(|dev| dev.num_transducers()).collect()
    }

    /// Get the firmware cycles of all transducers, in device order
    pub fn cycles(&self) -> Vec<u16> {
        self.devices.iter().flat_map(|dev| dev.cycles()).collect()
    }

    /// Get center position of all devices
    pub fn center(&self) -> Vector3 {
        self.devices.iter().map(|d| d.center()).sum::<Vector3>() / self.devices.len() as f64
    }

    /// Set speed of sound of all devices
    pub fn set_sound_speed(&mut self, c: f64) {
        self.devices.iter_mut().for_each(|dev| dev.sound_speed = c);
    }

    /// Set speed of sound of all devices from temperature
    pub fn set_sound_speed_from_temp(&mut self, temp: f64) {
        self.devices
            .iter_mut()
            .for_each(|dev| dev.set_sound_speed_from_temp(temp));
    }
}

impl Deref for Geometry {
    type Target = [Device];

    fn deref(&self) -> &Self::Target {
        &self.devices
    }
}

impl DerefMut for Geometry {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.devices
    }
}

impl<'a> IntoIterator for &'a Geometry {
    type Item = &'a Device;
    type IntoIter = std::slice::Iter<'a, Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.devices.iter()
    }
}

impl<'a> IntoIterator for &'a mut Geometry {
    type Item = &'a mut Device;
    type IntoIter = std::slice::IterMut<'a, Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.devices.iter_mut()
    }
}
