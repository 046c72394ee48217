mod rx;
mod tx;

pub use rx::{RxDatagram, RxMessage};
pub use tx::TxDatagram;
