use thiserror::Error;

use crate::{
    fpga::{
        CYCLE_MIN, FOCUS_STM_BUF_SIZE_MAX, FOCUS_STM_FIXED_NUM_LOWER, FOCUS_STM_FIXED_NUM_UNIT,
        FOCUS_STM_FIXED_NUM_UPPER, MOD_BUF_SIZE_MAX, SILENCER_CYCLE_MIN, STM_BUF_SIZE_MIN,
    },
    link::LinkError,
};

/// Errors raised while building or packing an operation.
///
/// Every variant except [`AUPADriverError::Link`] is a validation error: it is
/// raised synchronously from `pack`, aborts the command in progress and is never
/// retried.
#[derive(Error, Debug, PartialEq, Clone)]
#[non_exhaustive]
pub enum AUPADriverError {
    #[error("Sampling frequency division ({0}) is out of range (minimum is {1})")]
    FreqDivOutOfRange(u32, u32),

    #[error("Silencer cycle ({0}) is out of range (minimum is {min})", min = SILENCER_CYCLE_MIN)]
    SilencerCycleOutOfRange(u16),

    #[error("Modulation buffer size ({0}) is out of range ([1, {max}])", max = MOD_BUF_SIZE_MAX)]
    ModulationSizeOutOfRange(usize),

    #[error(
        "FocusSTM size ({0}) is out of range ([{min}, {max}])",
        min = STM_BUF_SIZE_MIN,
        max = FOCUS_STM_BUF_SIZE_MAX
    )]
    FocusSTMPointSizeOutOfRange(usize),

    #[error("Number of FocusSTM points must be the same on all devices")]
    FocusSTMPointSizeMismatch,

    #[error(
        "Point coordinate ({0}, {1}, {2}) is out of range ([{min}, {max}])",
        min = FOCUS_STM_FIXED_NUM_UNIT * FOCUS_STM_FIXED_NUM_LOWER as f64,
        max = FOCUS_STM_FIXED_NUM_UNIT * FOCUS_STM_FIXED_NUM_UPPER as f64
    )]
    FocusSTMPointOutOfRange(f64, f64, f64),

    #[error("GainSTM size ({0}) is out of range ([{min}, {1}])", min = STM_BUF_SIZE_MIN)]
    GainSTMSizeOutOfRange(usize, usize),

    #[error("STM start index ({0}) is out of range (must be less than {1})")]
    STMStartIndexOutOfRange(u16, usize),

    #[error("STM finish index ({0}) is out of range (must be less than {1})")]
    STMFinishIndexOutOfRange(u16, usize),

    #[error("Cycle ({0}) is out of range (minimum is {min})", min = CYCLE_MIN)]
    CycleOutOfRange(u16),

    #[error("Number of cycles ({0}) does not match the number of transducers ({1})")]
    CyclesSizeMismatch(usize, usize),

    #[error("Number of drives ({0}) does not match the number of transducers ({1})")]
    DrivesSizeMismatch(usize, usize),

    #[error("Number of devices ({0}) does not match the device map ({1})")]
    DeviceMapMismatch(usize, usize),

    #[error("Body region of {0} transducers is too small to carry any data")]
    InsufficientBodySize(usize),

    #[error("Link is closed")]
    LinkClosed,

    #[error("{0}")]
    Link(#[from] LinkError),
}
