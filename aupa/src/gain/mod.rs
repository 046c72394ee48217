mod custom;
mod focus;
mod null;
mod uniform;

pub use custom::Custom;
pub use focus::Focus;
pub use null::Null;
pub use uniform::Uniform;

use std::collections::HashMap;

use aupa_driver::{
    defined::PI,
    fpga::Drive,
    geometry::{Device, Geometry, Transducer},
    operation::{GainOp, Mode},
};

use crate::error::AUPAError;

/// Provider of the drive of every transducer
pub trait Gain {
    /// Calculate the drives, keyed by device index
    ///
    /// A device missing from the result is driven with [`Drive::null`].
    fn calc(&self, geometry: &Geometry) -> Result<HashMap<usize, Vec<Drive>>, AUPAError>;

    fn transform<F: Fn(&Device, &Transducer) -> Drive>(
        geometry: &Geometry,
        f: F,
    ) -> HashMap<usize, Vec<Drive>>
    where
        Self: Sized,
    {
        geometry
            .iter()
            .map(|dev| (dev.idx(), dev.iter().map(|tr| f(dev, tr)).collect()))
            .collect()
    }
}

impl Gain for Box<dyn Gain> {
    fn calc(&self, geometry: &Geometry) -> Result<HashMap<usize, Vec<Drive>>, AUPAError> {
        self.as_ref().calc(geometry)
    }
}

/// Convert a normalized amplitude into the duty ratio that emits it
pub fn amp_to_duty(amp: f64) -> f64 {
    amp.clamp(0., 1.).asin() / PI
}

/// Lay out the drives of a calculated gain in device order
pub(crate) fn flatten(geometry: &Geometry, mut drives: HashMap<usize, Vec<Drive>>) -> Vec<Drive> {
    geometry
        .iter()
        .flat_map(|dev| {
            drives
                .remove(&dev.idx())
                .unwrap_or_else(|| vec![Drive::null(); dev.num_transducers()])
        })
        .collect()
}

pub(crate) fn gain_operation<G: Gain>(
    gain: &G,
    geometry: &Geometry,
    mode: Mode,
) -> Result<GainOp, AUPAError> {
    let drives = flatten(geometry, gain.calc(geometry)?);
    tracing::debug!("gain of {} drives in {:?} mode", drives.len(), mode);
    Ok(GainOp::new(mode, drives, geometry.cycles()))
}

macro_rules! impl_gain_datagram {
    ($($t:ty),* $(,)?) => {
        $(
            impl $crate::datagram::Datagram for $t {
                type O1 = aupa_driver::operation::NullHeader;
                type O2 = aupa_driver::operation::GainOp;

                fn operation(
                    self,
                    geometry: &aupa_driver::geometry::Geometry,
                    mode: aupa_driver::operation::Mode,
                ) -> Result<(Self::O1, Self::O2), $crate::error::AUPAError> {
                    Ok((
                        Default::default(),
                        $crate::gain::gain_operation(&self, geometry, mode)?,
                    ))
                }
            }

            impl $crate::datagram::BodyDatagram for $t {}
        )*
    };
}

impl_gain_datagram!(Null, Uniform, Focus, Custom, Box<dyn Gain>);
