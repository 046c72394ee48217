use crate::{
    defined::MILLIMETER,
    geometry::{Device, IntoDevice, Matrix4, Transducer, UnitQuaternion, Vector3, Vector4},
};

/// The standard transducer board: an 18×14 grid with three unpopulated sites
#[derive(Clone, Copy, Debug)]
pub struct AUPA {
    position: Vector3,
    rotation: UnitQuaternion,
}

impl AUPA {
    /// Number of transducers in a board
    pub const NUM_TRANS_IN_UNIT: usize = 249;
    /// Number of transducers in x-axis
    pub const NUM_TRANS_X: usize = 18;
    /// Number of transducers in y-axis
    pub const NUM_TRANS_Y: usize = 14;
    /// Spacing between transducers
    pub const TRANS_SPACING: f64 = 10.16 * MILLIMETER;
    /// Width of the board including the substrate
    pub const DEVICE_WIDTH: f64 = 192.0 * MILLIMETER;
    /// Height of the board including the substrate
    pub const DEVICE_HEIGHT: f64 = 151.4 * MILLIMETER;

    /// Create a board placed at `position` with the given rotation
    pub fn new(position: Vector3, rotation: UnitQuaternion) -> Self {
        Self { position, rotation }
    }

    /// Create a board placed at `position` with ZYZ euler angles
    pub fn with_euler_zyz(position: Vector3, euler: Vector3) -> Self {
        Self::new(
            position,
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), euler.x)
                * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), euler.y)
                * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), euler.z),
        )
    }

    const fn is_missing_transducer(x: usize, y: usize) -> bool {
        y == 1 && (x == 1 || x == 2 || x == 16)
    }

    /// Get the grid position of the transducer of the given local index
    pub const fn grid_id(idx: usize) -> (usize, usize) {
        let local_id = idx % Self::NUM_TRANS_IN_UNIT;
        let uid = match local_id {
            0..19 => local_id,
            19..32 => local_id + 2,
            _ => local_id + 3,
        };
        (uid % Self::NUM_TRANS_X, uid / Self::NUM_TRANS_X)
    }
}

impl IntoDevice for AUPA {
    fn into_device(self, dev_idx: usize) -> Device {
        let transform = Matrix4::from(self.rotation).append_translation(&self.position);
        Device::new(
            dev_idx,
            itertools::iproduct!(0..Self::NUM_TRANS_Y, 0..Self::NUM_TRANS_X)
                .filter(|&(y, x)| !Self::is_missing_transducer(x, y))
                .map(|(y, x)| {
                    let local = Vector4::new(
                        x as f64 * Self::TRANS_SPACING,
                        y as f64 * Self::TRANS_SPACING,
                        0.,
                        1.,
                    );
                    let global = transform * local;
                    Vector3::new(global.x, global.y, global.z)
                })
                .enumerate()
                .map(|(i, p)| Transducer::new(i, p, self.rotation))
                .collect(),
        )
    }
}
