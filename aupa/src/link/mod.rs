mod audit;
mod nop;

pub use audit::Audit;
pub use nop::Nop;
