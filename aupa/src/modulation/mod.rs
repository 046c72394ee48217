mod custom;
mod sine;
mod r#static;

pub use custom::Custom;
pub use r#static::Static;
pub use sine::Sine;

use aupa_driver::{
    defined::PI,
    fpga::FPGA_CLK_FREQ,
    operation::{ModulationOp, NullBody},
};

use crate::error::AUPAError;

/// Default sampling frequency division, 4 kHz
pub const DEFAULT_SAMPLING_FREQ_DIV: u32 = 40960;

/// Provider of the modulation buffer
pub trait Modulation {
    /// Calculate the normalized amplitude of every sample
    fn calc(&self) -> Result<Vec<f64>, AUPAError>;

    fn sampling_frequency_division(&self) -> u32;

    /// Sampling frequency in Hz
    fn sampling_frequency(&self) -> f64 {
        FPGA_CLK_FREQ as f64 / self.sampling_frequency_division() as f64
    }
}

impl Modulation for Box<dyn Modulation> {
    fn calc(&self) -> Result<Vec<f64>, AUPAError> {
        self.as_ref().calc()
    }

    fn sampling_frequency_division(&self) -> u32 {
        self.as_ref().sampling_frequency_division()
    }
}

/// Convert a normalized amplitude into the 8-bit duty sample of the firmware
pub fn to_sample(amp: f64) -> u8 {
    (amp.clamp(0., 1.).asin() / PI * 510.).round() as u8
}

pub(crate) fn modulation_operation<M: Modulation>(
    m: &M,
) -> Result<(ModulationOp, NullBody), AUPAError> {
    let buf = m.calc()?.into_iter().map(to_sample).collect::<Vec<_>>();
    tracing::debug!(
        "modulation of {} samples, freq_div = {}",
        buf.len(),
        m.sampling_frequency_division()
    );
    Ok((
        ModulationOp::new(buf, m.sampling_frequency_division()),
        NullBody::default(),
    ))
}

macro_rules! impl_modulation_datagram {
    ($($t:ty),* $(,)?) => {
        $(
            impl $crate::datagram::Datagram for $t {
                type O1 = aupa_driver::operation::ModulationOp;
                type O2 = aupa_driver::operation::NullBody;

                fn operation(
                    self,
                    _: &aupa_driver::geometry::Geometry,
                    _: aupa_driver::operation::Mode,
                ) -> Result<(Self::O1, Self::O2), $crate::error::AUPAError> {
                    $crate::modulation::modulation_operation(&self)
                }
            }

            impl $crate::datagram::HeaderDatagram for $t {}
        )*
    };
}

impl_modulation_datagram!(Static, Sine, Custom, Box<dyn Modulation>);
