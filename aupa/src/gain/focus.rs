use std::collections::HashMap;

use aupa_driver::{
    defined::PI,
    fpga::Drive,
    geometry::{Geometry, Vector3},
};

use super::{amp_to_duty, Gain};
use crate::error::AUPAError;

/// Gain to produce a focal point
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Focus {
    pos: Vector3,
    amp: f64,
}

impl Focus {
    /// `pos` is the position of the focal point in the global frame
    pub const fn new(pos: Vector3) -> Self {
        Self { pos, amp: 1.0 }
    }

    pub const fn with_amp(self, amp: f64) -> Self {
        Self { amp, ..self }
    }

    pub const fn pos(&self) -> Vector3 {
        self.pos
    }

    pub const fn amp(&self) -> f64 {
        self.amp
    }
}

impl Gain for Focus {
    fn calc(&self, geometry: &Geometry) -> Result<HashMap<usize, Vec<Drive>>, AUPAError> {
        let duty = amp_to_duty(self.amp);
        Ok(Self::transform(geometry, |dev, tr| {
            let dist = (tr.position() - self.pos).norm();
            Drive::new(dist * tr.wavenumber(dev.sound_speed) / (2. * PI), duty)
        }))
    }
}
