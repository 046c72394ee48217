use super::{Matrix4, Quaternion, UnitQuaternion, Vector3, Vector4};

use crate::{defined::PI, fpga::FPGA_CLK_FREQ};

/// Default firmware cycle of a transducer (40 kHz with the 163.84 MHz FPGA clock)
pub const DEFAULT_CYCLE: u16 = 4096;

#[derive(Clone, Debug, PartialEq)]
pub struct Transducer {
    idx: usize,
    pos: Vector3,
    rot: UnitQuaternion,
    cycle: u16,
}

impl Transducer {
    #[doc(hidden)]
    pub const fn new(idx: usize, pos: Vector3, rot: UnitQuaternion) -> Self {
        Self {
            idx,
            pos,
            rot,
            cycle: DEFAULT_CYCLE,
        }
    }

    /// Affine transformation
    pub fn affine(&mut self, t: Vector3, r: UnitQuaternion) {
        let new_pos = Matrix4::from(r).append_translation(&t)
            * Vector4::new(self.pos[0], self.pos[1], self.pos[2], 1.0);
        self.pos = Vector3::new(new_pos[0], new_pos[1], new_pos[2]);
        self.rot = r * self.rot;
    }

    /// Get the position of the transducer
    pub const fn position(&self) -> &Vector3 {
        &self.pos
    }

    /// Get the rotation of the transducer
    pub const fn rotation(&self) -> &UnitQuaternion {
        &self.rot
    }

    fn get_direction(dir: Vector3, rotation: &UnitQuaternion) -> Vector3 {
        let dir: UnitQuaternion = UnitQuaternion::from_quaternion(Quaternion::from_imag(dir));
        (rotation * dir * rotation.conjugate()).imag().normalize()
    }

    /// Get the x-direction of the transducer
    pub fn x_direction(&self) -> Vector3 {
        Self::get_direction(Vector3::x(), self.rotation())
    }
    /// Get the y-direction of the transducer
    pub fn y_direction(&self) -> Vector3 {
        Self::get_direction(Vector3::y(), self.rotation())
    }
    /// Get the z-direction of the transducer
    pub fn z_direction(&self) -> Vector3 {
        Self::get_direction(Vector3::z(), self.rotation())
    }

    /// Get the local transducer index
    pub const fn idx(&self) -> usize {
        self.idx
    }

    /// Get the firmware cycle of the transducer
    pub const fn cycle(&self) -> u16 {
        self.cycle
    }

    /// Set the firmware cycle of the transducer
    ///
    /// The ultrasound frequency becomes `FPGA_CLK_FREQ / cycle`.
    pub fn set_cycle(&mut self, cycle: u16) {
        self.cycle = cycle;
    }

    /// Get the ultrasound frequency of the transducer
    pub fn frequency(&self) -> f64 {
        FPGA_CLK_FREQ as f64 / self.cycle as f64
    }

    /// Set the ultrasound frequency of the transducer
    ///
    /// The frequency is rounded to the nearest one representable by a cycle.
    /// Frequencies above `2 * FPGA_CLK_FREQ` give a cycle of 0, which is rejected when packed.
    pub fn set_frequency(&mut self, freq: f64) {
        self.cycle = (FPGA_CLK_FREQ as f64 / freq).round() as u16;
    }

    /// Get the wavelength of the transducer
    pub fn wavelength(&self, sound_speed: f64) -> f64 {
        sound_speed / self.frequency()
    }

    /// Get the wavenumber of the transducer
    pub fn wavenumber(&self, sound_speed: f64) -> f64 {
        2.0 * PI * self.frequency() / sound_speed
    }
}
