use aupa_driver::{
    cpu::GainSTMMode,
    fpga::{FPGAInfo, STMFocus, SILENCER_CYCLE_DEFAULT, SILENCER_STEP_DEFAULT},
    geometry::DEFAULT_CYCLE,
};

/// Memory and control registers of the FPGA of one device
pub struct FPGAEmulator {
    num_transducers: usize,
    pub(crate) cycles: Vec<u16>,
    pub(crate) phases: Vec<u16>,
    pub(crate) duties: Vec<u16>,
    pub(crate) legacy_mode: bool,
    pub(crate) stm_mode: bool,
    pub(crate) stm_gain_mode: bool,
    pub(crate) force_fan: bool,
    pub(crate) thermal_assert: bool,
    pub(crate) mod_freq_div: u32,
    pub(crate) mod_bram: Vec<u8>,
    pub(crate) mod_cycle: usize,
    pub(crate) silencer_cycle: u16,
    pub(crate) silencer_step: u16,
    pub(crate) stm_freq_div: u32,
    pub(crate) stm_start_idx: Option<u16>,
    pub(crate) stm_finish_idx: Option<u16>,
    pub(crate) sound_speed: u32,
    pub(crate) focus_stm_bram: Vec<STMFocus>,
    pub(crate) gain_stm_mode: GainSTMMode,
    pub(crate) gain_stm_phases: Vec<Vec<u16>>,
    pub(crate) gain_stm_duties: Vec<Vec<u16>>,
    pub(crate) stm_cycle: usize,
}

impl FPGAEmulator {
    pub(crate) fn new(num_transducers: usize) -> Self {
        let mut fpga = Self {
            num_transducers,
            cycles: Vec::new(),
            phases: Vec::new(),
            duties: Vec::new(),
            legacy_mode: false,
            stm_mode: false,
            stm_gain_mode: false,
            force_fan: false,
            thermal_assert: false,
            mod_freq_div: 0,
            mod_bram: Vec::new(),
            mod_cycle: 0,
            silencer_cycle: 0,
            silencer_step: 0,
            stm_freq_div: 0,
            stm_start_idx: None,
            stm_finish_idx: None,
            sound_speed: 0,
            focus_stm_bram: Vec::new(),
            gain_stm_mode: GainSTMMode::default(),
            gain_stm_phases: Vec::new(),
            gain_stm_duties: Vec::new(),
            stm_cycle: 0,
        };
        fpga.init();
        fpga
    }

    pub(crate) fn init(&mut self) {
        self.cycles = vec![DEFAULT_CYCLE; self.num_transducers];
        self.phases = vec![0; self.num_transducers];
        self.duties = vec![0; self.num_transducers];
        self.legacy_mode = true;
        self.stm_mode = false;
        self.stm_gain_mode = false;
        self.force_fan = false;
        self.mod_freq_div = 40960;
        self.mod_bram = vec![0x00, 0x00];
        self.mod_cycle = 2;
        self.silencer_cycle = SILENCER_CYCLE_DEFAULT;
        self.silencer_step = SILENCER_STEP_DEFAULT;
        self.stm_freq_div = 0;
        self.stm_start_idx = None;
        self.stm_finish_idx = None;
        self.sound_speed = 0;
        self.focus_stm_bram.clear();
        self.gain_stm_mode = GainSTMMode::default();
        self.gain_stm_phases.clear();
        self.gain_stm_duties.clear();
        self.stm_cycle = 0;
    }

    pub fn num_transducers(&self) -> usize {
        self.num_transducers
    }

    pub fn cycles(&self) -> &[u16] {
        &self.cycles
    }

    /// Phases of the current gain, in firmware units
    pub fn phases(&self) -> &[u16] {
        &self.phases
    }

    /// Duties of the current gain, in firmware units
    pub fn duties(&self) -> &[u16] {
        &self.duties
    }

    pub fn is_legacy_mode(&self) -> bool {
        self.legacy_mode
    }

    pub fn is_stm_mode(&self) -> bool {
        self.stm_mode
    }

    pub fn is_stm_gain_mode(&self) -> bool {
        self.stm_gain_mode
    }

    pub fn is_force_fan(&self) -> bool {
        self.force_fan
    }

    pub fn assert_thermal_sensor(&mut self) {
        self.thermal_assert = true;
    }

    pub fn deassert_thermal_sensor(&mut self) {
        self.thermal_assert = false;
    }

    pub fn fpga_info(&self) -> FPGAInfo {
        FPGAInfo::new(self.thermal_assert as u8)
    }

    pub fn modulation_frequency_division(&self) -> u32 {
        self.mod_freq_div
    }

    pub fn modulation(&self) -> &[u8] {
        &self.mod_bram[..self.mod_cycle]
    }

    pub fn silencer_cycle(&self) -> u16 {
        self.silencer_cycle
    }

    pub fn silencer_step(&self) -> u16 {
        self.silencer_step
    }

    pub fn stm_frequency_division(&self) -> u32 {
        self.stm_freq_div
    }

    pub fn stm_start_idx(&self) -> Option<u16> {
        self.stm_start_idx
    }

    pub fn stm_finish_idx(&self) -> Option<u16> {
        self.stm_finish_idx
    }

    /// Number of entries of the current STM
    pub fn stm_cycle(&self) -> usize {
        self.stm_cycle
    }

    /// Speed of sound of the current FocusSTM, in the firmware fixed point
    pub fn sound_speed(&self) -> u32 {
        self.sound_speed
    }

    pub fn focus_stm(&self) -> &[STMFocus] {
        &self.focus_stm_bram[..self.stm_cycle.min(self.focus_stm_bram.len())]
    }

    pub fn gain_stm_mode(&self) -> GainSTMMode {
        self.gain_stm_mode
    }

    /// Phases of the `idx`-th GainSTM frame
    pub fn gain_stm_phases(&self, idx: usize) -> &[u16] {
        &self.gain_stm_phases[idx]
    }

    /// Duties of the `idx`-th GainSTM frame
    pub fn gain_stm_duties(&self, idx: usize) -> &[u16] {
        &self.gain_stm_duties[idx]
    }
}
