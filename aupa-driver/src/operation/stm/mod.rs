mod focus;
mod gain;

pub use focus::*;
pub use gain::*;

use crate::{cpu::FPGAControlFlags, error::AUPADriverError};

/// Validate the optional start and finish indices of an STM with `size` entries
fn validate_idx(
    start_idx: Option<u16>,
    finish_idx: Option<u16>,
    size: usize,
) -> Result<(), AUPADriverError> {
    if let Some(idx) = start_idx {
        if idx as usize >= size {
            return Err(AUPADriverError::STMStartIndexOutOfRange(idx, size));
        }
    }
    if let Some(idx) = finish_idx {
        if idx as usize >= size {
            return Err(AUPADriverError::STMFinishIndexOutOfRange(idx, size));
        }
    }
    Ok(())
}

fn idx_flags(start_idx: Option<u16>, finish_idx: Option<u16>) -> FPGAControlFlags {
    let mut flags = FPGAControlFlags::NONE;
    flags.set(FPGAControlFlags::USE_STM_START_IDX, start_idx.is_some());
    flags.set(FPGAControlFlags::USE_STM_FINISH_IDX, finish_idx.is_some());
    flags
}
