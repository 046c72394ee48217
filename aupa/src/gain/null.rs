use std::collections::HashMap;

use aupa_driver::{fpga::Drive, geometry::Geometry};

use super::Gain;
use crate::error::AUPAError;

/// Gain to output nothing
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Null {}

impl Null {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Gain for Null {
    fn calc(&self, geometry: &Geometry) -> Result<HashMap<usize, Vec<Drive>>, AUPAError> {
        Ok(Self::transform(geometry, |_, _| Drive::null()))
    }
}
