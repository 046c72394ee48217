use std::collections::HashMap;

use aupa_driver::{fpga::Drive, geometry::Geometry};

use super::Gain;
use crate::error::AUPAError;

/// Gain with drives given by the user, keyed by device index
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Custom {
    drives: HashMap<usize, Vec<Drive>>,
}

impl Custom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the drives of the device `dev_idx`
    pub fn set(mut self, dev_idx: usize, drives: Vec<Drive>) -> Self {
        self.drives.insert(dev_idx, drives);
        self
    }

    pub fn drives(&self) -> &HashMap<usize, Vec<Drive>> {
        &self.drives
    }
}

impl Gain for Custom {
    fn calc(&self, geometry: &Geometry) -> Result<HashMap<usize, Vec<Drive>>, AUPAError> {
        self.drives.iter().try_for_each(|(&idx, d)| {
            let dev = geometry.get(idx).ok_or_else(|| {
                AUPAError::GainError(format!("Device {} is not connected", idx))
            })?;
            if d.len() != dev.num_transducers() {
                return Err(AUPAError::GainError(format!(
                    "Device {} has {} transducers, but {} drives are given",
                    idx,
                    dev.num_transducers(),
                    d.len()
                )));
            }
            Ok(())
        })?;
        Ok(self.drives.clone())
    }
}
