pub mod controller;
pub mod datagram;
pub mod error;
pub mod gain;
pub mod link;
pub mod modulation;
pub mod prelude;
pub mod stm;

pub use aupa_driver as driver;

pub use controller::Controller;
