use zerocopy::{little_endian::U16, IntoBytes};

use crate::cpu::{CPUControlFlags, Header, HEADER_SIZE};

/// Frame transmitted to the devices: one header followed by one body region per device
#[derive(Clone, Debug)]
pub struct TxDatagram {
    header: Header,
    body: Vec<U16>,
    body_pointer: Vec<usize>,
}

impl TxDatagram {
    /// Allocate a frame whose `i`-th body region holds `device_map[i]` words
    pub fn new(device_map: &[usize]) -> Self {
        let body_pointer = std::iter::once(0)
            .chain(device_map.iter().scan(0, |acc, &n| {
                *acc += n;
                Some(*acc)
            }))
            .collect::<Vec<_>>();
        let num_transducers = body_pointer.last().copied().unwrap_or(0);
        Self {
            header: Header::default(),
            body: vec![U16::ZERO; num_transducers],
            body_pointer,
        }
    }

    pub fn num_devices(&self) -> usize {
        self.body_pointer.len() - 1
    }

    pub fn num_transducers(&self) -> usize {
        self.body.len()
    }

    /// Number of body regions that are transmitted with the current header
    ///
    /// All regions are sent when `WRITE_BODY` is set, or when the header requests a
    /// sync (which carries the cycles in the body). Otherwise only the header is sent.
    pub fn num_bodies(&self) -> usize {
        let flag = self.header.cpu_flag;
        if flag.contains(CPUControlFlags::WRITE_BODY)
            || (flag.contains(CPUControlFlags::CONFIG_SYNC)
                && !flag.contains(CPUControlFlags::MOD))
        {
            self.num_devices()
        } else {
            0
        }
    }

    /// Number of bytes to put on the wire
    pub fn transmitting_size(&self) -> usize {
        HEADER_SIZE + self.body_pointer[self.num_bodies()] * std::mem::size_of::<U16>()
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Body region of the `idx`-th device
    pub fn body(&self, idx: usize) -> &[U16] {
        &self.body[self.body_pointer[idx]..self.body_pointer[idx + 1]]
    }

    pub fn body_mut(&mut self, idx: usize) -> &mut [U16] {
        &mut self.body[self.body_pointer[idx]..self.body_pointer[idx + 1]]
    }

    /// Body region of the `idx`-th device as raw bytes
    pub fn body_bytes_mut(&mut self, idx: usize) -> &mut [u8] {
        let range = self.body_pointer[idx]..self.body_pointer[idx + 1];
        self.body[range].as_mut_bytes()
    }

    /// All body regions, in device order
    pub fn body_raw(&self) -> &[U16] {
        &self.body
    }

    pub fn body_raw_mut(&mut self) -> &mut [U16] {
        &mut self.body
    }

    /// Serialize the transmitted part of the frame into `dst`
    ///
    /// Returns the number of bytes written.
    pub fn copy_to(&self, dst: &mut [u8]) -> usize {
        let len = self.transmitting_size();
        dst[..HEADER_SIZE].copy_from_slice(self.header.as_bytes());
        dst[HEADER_SIZE..len].copy_from_slice(
            self.body[..self.body_pointer[self.num_bodies()]].as_bytes(),
        );
        len
    }

    /// Reset the header and zero the body
    pub fn clear(&mut self) {
        self.header = Header::default();
        self.body.fill(U16::ZERO);
    }
}
