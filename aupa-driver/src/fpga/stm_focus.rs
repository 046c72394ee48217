use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{error::AUPADriverError, geometry::Vector3};

use super::{FOCUS_STM_FIXED_NUM_LOWER, FOCUS_STM_FIXED_NUM_UNIT, FOCUS_STM_FIXED_NUM_UPPER};

/// One focus point of a FocusSTM, as stored by the firmware
#[bitfield_struct::bitfield(u64)]
#[derive(PartialEq, Eq, IntoBytes, FromBytes, Immutable, KnownLayout)]
pub struct STMFocus {
    #[bits(18)]
    pub x: i32,
    #[bits(18)]
    pub y: i32,
    #[bits(18)]
    pub z: i32,
    #[bits(4)]
    pub duty_shift: u8,
    #[bits(6)]
    __: u8,
}

impl STMFocus {
    fn to_fixed_num(x: f64) -> i32 {
        (x / FOCUS_STM_FIXED_NUM_UNIT).round() as i32
    }

    /// Create a record from a point in the local frame of a device
    pub fn create(p: &Vector3, duty_shift: u8) -> Result<Self, AUPADriverError> {
        let ix = Self::to_fixed_num(p.x);
        let iy = Self::to_fixed_num(p.y);
        let iz = Self::to_fixed_num(p.z);

        let range = FOCUS_STM_FIXED_NUM_LOWER..=FOCUS_STM_FIXED_NUM_UPPER;
        if !range.contains(&ix) || !range.contains(&iy) || !range.contains(&iz) {
            return Err(AUPADriverError::FocusSTMPointOutOfRange(p.x, p.y, p.z));
        }

        Ok(Self::new()
            .with_x(ix)
            .with_y(iy)
            .with_z(iz)
            .with_duty_shift(duty_shift))
    }

    /// Point in the local frame of the device
    pub fn point(&self) -> Vector3 {
        Vector3::new(
            self.x() as f64 * FOCUS_STM_FIXED_NUM_UNIT,
            self.y() as f64 * FOCUS_STM_FIXED_NUM_UNIT,
            self.z() as f64 * FOCUS_STM_FIXED_NUM_UNIT,
        )
    }
}
