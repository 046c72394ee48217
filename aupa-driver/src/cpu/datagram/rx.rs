use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

/// Status reported by one device
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, IntoBytes, FromBytes, Immutable, KnownLayout, Unaligned)]
pub struct RxMessage {
    /// FPGA info or the byte requested by a firmware info read
    pub ack: u8,
    /// Id of the last frame consumed by the device
    pub msg_id: u8,
}

/// Status of all devices, in device order
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Deref, derive_more::DerefMut)]
pub struct RxDatagram(Vec<RxMessage>);

impl RxDatagram {
    pub fn new(num_devices: usize) -> Self {
        Self(vec![RxMessage::default(); num_devices])
    }

    /// Check if every device has consumed the frame with `msg_id`
    pub fn is_msg_processed(&self, msg_id: u8) -> bool {
        self.0.iter().all(|msg| msg.msg_id == msg_id)
    }

    /// Copy the status of all devices from raw bytes
    pub fn copy_from(&mut self, src: &[u8]) {
        self.0
            .iter_mut()
            .zip(src.chunks_exact(std::mem::size_of::<RxMessage>()))
            .for_each(|(msg, bytes)| {
                if let Ok(m) = RxMessage::read_from_bytes(bytes) {
                    *msg = m;
                }
            });
    }
}
