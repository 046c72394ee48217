use std::time::Duration;

pub use std::f64::consts::PI;

#[cfg(feature = "use_meter")]
mod unit {
    pub const METER: f64 = 1.0;
}
#[cfg(not(feature = "use_meter"))]
mod unit {
    pub const METER: f64 = 1000.0;
}
pub use unit::*;

pub const MILLIMETER: f64 = METER / 1000.0;

#[allow(non_upper_case_globals)]
pub const mm: f64 = MILLIMETER;

/// Default timeout of a whole command when none is given
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(200);

/// Speed of sound in air at about 15 °C
pub const DEFAULT_SOUND_SPEED: f64 = 340.0 * METER;
