mod focus;
mod gain;

pub use focus::FocusSTM;
pub use gain::GainSTM;

use aupa_driver::fpga::FPGA_CLK_FREQ;

/// Sampling frequency division that plays `size` entries at `freq` Hz
fn freq_div_from_freq(freq: f64, size: usize) -> u32 {
    (FPGA_CLK_FREQ as f64 / (freq * size as f64)).round() as u32
}
