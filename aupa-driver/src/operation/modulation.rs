use zerocopy::little_endian::U32;

use crate::{
    cpu::{
        CPUControlFlags, ModHeadInitial, TxDatagram, MOD_HEAD_INITIAL_CAPACITY,
        MOD_HEAD_SUBSEQUENT_CAPACITY,
    },
    error::AUPADriverError,
    fpga::{MOD_BUF_SIZE_MAX, MOD_SAMPLING_FREQ_DIV_MIN},
    operation::{write_to_tx, Operation},
};

/// Stream a modulation buffer through the header payload
pub struct ModulationOp {
    buf: Vec<u8>,
    freq_div: u32,
    sent: usize,
}

impl ModulationOp {
    pub fn new(buf: Vec<u8>, freq_div: u32) -> Self {
        Self {
            buf,
            freq_div,
            sent: 0,
        }
    }

    fn validate(&self) -> Result<(), AUPADriverError> {
        if self.freq_div < MOD_SAMPLING_FREQ_DIV_MIN {
            return Err(AUPADriverError::FreqDivOutOfRange(
                self.freq_div,
                MOD_SAMPLING_FREQ_DIV_MIN,
            ));
        }
        if self.buf.is_empty() || self.buf.len() > MOD_BUF_SIZE_MAX {
            return Err(AUPADriverError::ModulationSizeOutOfRange(self.buf.len()));
        }
        Ok(())
    }
}

impl Operation for ModulationOp {
    fn init(&mut self) {
        self.sent = 0;
    }

    fn pack(&mut self, tx: &mut TxDatagram) -> Result<(), AUPADriverError> {
        tx.header_mut().cpu_flag.remove(CPUControlFlags::HEADER_MASK);
        tx.header_mut().size = 0;

        if self.is_finished() {
            return Ok(());
        }

        let is_first_frame = self.sent == 0;
        if is_first_frame {
            self.validate()?;
        }

        let max_size = if is_first_frame {
            MOD_HEAD_INITIAL_CAPACITY
        } else {
            MOD_HEAD_SUBSEQUENT_CAPACITY
        };
        let mod_size = (self.buf.len() - self.sent).min(max_size);
        let data = &self.buf[self.sent..self.sent + mod_size];

        let header = tx.header_mut();
        header.cpu_flag.insert(CPUControlFlags::MOD);
        if is_first_frame {
            header.cpu_flag.insert(CPUControlFlags::MOD_BEGIN);
            let mut head = ModHeadInitial {
                freq_div: U32::new(self.freq_div),
                data: [0; MOD_HEAD_INITIAL_CAPACITY],
            };
            head.data[..mod_size].copy_from_slice(data);
            write_to_tx(&mut header.payload, head);
        } else {
            header.payload[..mod_size].copy_from_slice(data);
        }
        if self.sent + mod_size == self.buf.len() {
            header.cpu_flag.insert(CPUControlFlags::MOD_END);
        }
        header.size = mod_size as u8;

        self.sent += mod_size;
        Ok(())
    }

    fn is_finished(&self) -> bool {
        !self.buf.is_empty() && self.sent == self.buf.len()
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use zerocopy::FromBytes;

    use super::*;
    use crate::{cpu::ModHeadSubsequent, operation::tests::create_tx};

    fn pack_all(op: &mut ModulationOp, tx: &mut TxDatagram) -> anyhow::Result<Vec<u8>> {
        let mut received = Vec::new();
        while !op.is_finished() {
            op.pack(tx)?;
            let size = tx.header().size as usize;
            if tx.header().cpu_flag.contains(CPUControlFlags::MOD_BEGIN) {
                let (h, _) = ModHeadInitial::read_from_prefix(&tx.header().payload)
                    .map_err(|_| anyhow::anyhow!("read"))?;
                received.extend_from_slice(&h.data[..size]);
            } else {
                let (h, _) = ModHeadSubsequent::read_from_prefix(&tx.header().payload)
                    .map_err(|_| anyhow::anyhow!("read"))?;
                received.extend_from_slice(&h.data[..size]);
            }
        }
        Ok(received)
    }

    #[test]
    fn three_frames() -> anyhow::Result<()> {
        let mut rng = rand::rng();
        let mut tx = create_tx(2, 10);

        let buf = (0..MOD_HEAD_INITIAL_CAPACITY + MOD_HEAD_SUBSEQUENT_CAPACITY + 1)
            .map(|_| rng.random())
            .collect::<Vec<u8>>();
        let mut op = ModulationOp::new(buf.clone(), MOD_SAMPLING_FREQ_DIV_MIN);
        op.init();
        assert!(!op.is_finished());

        op.pack(&mut tx)?;
        assert!(!op.is_finished());
        let flag = tx.header().cpu_flag;
        assert!(flag.contains(CPUControlFlags::MOD));
        assert!(flag.contains(CPUControlFlags::MOD_BEGIN));
        assert!(!flag.contains(CPUControlFlags::MOD_END));
        assert_eq!(MOD_HEAD_INITIAL_CAPACITY, tx.header().size as usize);
        let (h, _) = ModHeadInitial::read_from_prefix(&tx.header().payload)
            .map_err(|_| anyhow::anyhow!("read"))?;
        assert_eq!(MOD_SAMPLING_FREQ_DIV_MIN, h.freq_div.get());
        assert_eq!(&buf[..MOD_HEAD_INITIAL_CAPACITY], &h.data[..]);

        op.pack(&mut tx)?;
        assert!(!op.is_finished());
        let flag = tx.header().cpu_flag;
        assert!(flag.contains(CPUControlFlags::MOD));
        assert!(!flag.contains(CPUControlFlags::MOD_BEGIN));
        assert!(!flag.contains(CPUControlFlags::MOD_END));
        assert_eq!(MOD_HEAD_SUBSEQUENT_CAPACITY, tx.header().size as usize);
        assert_eq!(
            &buf[MOD_HEAD_INITIAL_CAPACITY..MOD_HEAD_INITIAL_CAPACITY + MOD_HEAD_SUBSEQUENT_CAPACITY],
            &tx.header().payload[..]
        );

        op.pack(&mut tx)?;
        assert!(op.is_finished());
        let flag = tx.header().cpu_flag;
        assert!(flag.contains(CPUControlFlags::MOD));
        assert!(!flag.contains(CPUControlFlags::MOD_BEGIN));
        assert!(flag.contains(CPUControlFlags::MOD_END));
        assert_eq!(1, tx.header().size);
        assert_eq!(buf[buf.len() - 1], tx.header().payload[0]);

        assert_eq!(0, tx.num_bodies());
        Ok(())
    }

    #[rstest::rstest]
    #[test]
    #[case(1)]
    #[case(MOD_HEAD_INITIAL_CAPACITY)]
    #[case(MOD_HEAD_INITIAL_CAPACITY + 1)]
    #[case(2000)]
    #[case(MOD_BUF_SIZE_MAX)]
    fn stream(#[case] size: usize) -> anyhow::Result<()> {
        let mut rng = rand::rng();
        let mut tx = create_tx(1, 10);

        let buf = (0..size).map(|_| rng.random()).collect::<Vec<u8>>();
        let mut op = ModulationOp::new(buf.clone(), 40960);
        op.init();
        assert_eq!(buf, pack_all(&mut op, &mut tx)?);
        assert!(tx.header().cpu_flag.contains(CPUControlFlags::MOD_END));
        Ok(())
    }

    #[test]
    fn single_frame() -> anyhow::Result<()> {
        let mut tx = create_tx(1, 10);
        let mut op = ModulationOp::new(vec![0xFF; 2], MOD_SAMPLING_FREQ_DIV_MIN);
        op.init();
        op.pack(&mut tx)?;
        assert!(op.is_finished());
        assert!(tx.header().cpu_flag.contains(
            CPUControlFlags::MOD | CPUControlFlags::MOD_BEGIN | CPUControlFlags::MOD_END
        ));
        assert_eq!(2, tx.header().size);
        Ok(())
    }

    #[test]
    fn after_finished() -> anyhow::Result<()> {
        let mut tx = create_tx(1, 10);
        let mut op = ModulationOp::new(vec![0x80; 2], MOD_SAMPLING_FREQ_DIV_MIN);
        op.init();
        op.pack(&mut tx)?;
        let payload = tx.header().payload;

        op.pack(&mut tx)?;
        assert!(op.is_finished());
        assert!(!tx.header().cpu_flag.intersects(CPUControlFlags::HEADER_MASK));
        assert_eq!(0, tx.header().size);
        assert_eq!(payload, tx.header().payload);
        assert!(op.is_finished());
        Ok(())
    }

    #[rstest::rstest]
    #[test]
    #[case(Err(AUPADriverError::FreqDivOutOfRange(MOD_SAMPLING_FREQ_DIV_MIN - 1, MOD_SAMPLING_FREQ_DIV_MIN)), MOD_SAMPLING_FREQ_DIV_MIN - 1)]
    #[case(Ok(()), MOD_SAMPLING_FREQ_DIV_MIN)]
    #[case(Ok(()), u32::MAX)]
    fn test_freq_div(#[case] expected: Result<(), AUPADriverError>, #[case] freq_div: u32) {
        let mut tx = create_tx(1, 10);
        let mut op = ModulationOp::new(vec![0; 10], freq_div);
        op.init();
        assert_eq!(expected, op.pack(&mut tx));
    }

    #[rstest::rstest]
    #[test]
    #[case(Err(AUPADriverError::ModulationSizeOutOfRange(0)), 0)]
    #[case(Ok(()), 1)]
    #[case(Ok(()), MOD_BUF_SIZE_MAX)]
    #[case(Err(AUPADriverError::ModulationSizeOutOfRange(MOD_BUF_SIZE_MAX + 1)), MOD_BUF_SIZE_MAX + 1)]
    fn buffer_size(#[case] expected: Result<(), AUPADriverError>, #[case] size: usize) {
        let mut tx = create_tx(1, 10);
        let mut op = ModulationOp::new(vec![0; size], MOD_SAMPLING_FREQ_DIV_MIN);
        op.init();
        assert_eq!(expected, op.pack(&mut tx));
    }

    #[test]
    fn init_rewinds() -> anyhow::Result<()> {
        let mut tx = create_tx(1, 10);
        let mut op = ModulationOp::new(vec![0; 300], MOD_SAMPLING_FREQ_DIV_MIN);
        op.init();
        op.pack(&mut tx)?;
        op.pack(&mut tx)?;
        op.init();
        op.pack(&mut tx)?;
        assert!(tx.header().cpu_flag.contains(CPUControlFlags::MOD_BEGIN));
        assert_eq!(MOD_HEAD_INITIAL_CAPACITY, tx.header().size as usize);
        Ok(())
    }
}
