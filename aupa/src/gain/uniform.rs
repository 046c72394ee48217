use std::collections::HashMap;

use aupa_driver::{fpga::Drive, geometry::Geometry};

use super::{amp_to_duty, Gain};
use crate::error::AUPAError;

/// Gain with the same amplitude and phase on every transducer
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Uniform {
    amp: f64,
    phase: f64,
}

impl Uniform {
    /// `amp` is the normalized amplitude in `[0, 1]`
    pub const fn new(amp: f64) -> Self {
        Self { amp, phase: 0. }
    }

    /// Set the phase as a fraction of the period
    pub const fn with_phase(self, phase: f64) -> Self {
        Self { phase, ..self }
    }

    pub const fn amp(&self) -> f64 {
        self.amp
    }

    pub const fn phase(&self) -> f64 {
        self.phase
    }
}

impl Gain for Uniform {
    fn calc(&self, geometry: &Geometry) -> Result<HashMap<usize, Vec<Drive>>, AUPAError> {
        let drive = Drive::new(self.phase, amp_to_duty(self.amp));
        Ok(Self::transform(geometry, |_, _| drive))
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;
    use crate::tests::create_geometry;

    #[test]
    fn uniform() -> anyhow::Result<()> {
        let mut rng = rand::rng();
        let geometry = create_geometry(2);

        let amp = rng.random_range(0.0..=1.0);
        let phase = rng.random_range(0.0..1.0);
        let g = Uniform::new(amp).with_phase(phase);
        assert_eq!(amp, g.amp());
        assert_eq!(phase, g.phase());

        let d = g.calc(&geometry)?;
        assert_eq!(geometry.num_devices(), d.len());
        d.values().flatten().for_each(|d| {
            assert_eq!(phase, d.phase);
            assert_eq!(amp_to_duty(amp), d.duty);
        });

        Ok(())
    }
}
