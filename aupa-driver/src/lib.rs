#![doc = "Datagram format, firmware operations and the link interface of the AUPA phased-array rig."]

pub mod aupa_device;
pub mod cpu;
pub mod defined;
pub mod error;
pub mod firmware_version;
pub mod fpga;
pub mod geometry;
pub mod link;
pub mod operation;
