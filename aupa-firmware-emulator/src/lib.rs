pub mod cpu;
pub mod fpga;

pub use cpu::emulator::CPUEmulator;
pub use fpga::emulator::FPGAEmulator;
