use std::mem::size_of;

use aupa_driver::{
    cpu::{CPUControlFlags, FPGAControlFlags, GainSTMMode, Header},
    fpga::{LegacyDrive, STMFocus},
    operation::stm::{FocusSTMBodyInitial, FocusSTMBodySubsequent},
};
use zerocopy::{little_endian::U16, FromBytes, IntoBytes};

use crate::CPUEmulator;

impl CPUEmulator {
    fn set_stm_idx(&mut self, header: &Header, start_idx: u16, finish_idx: u16) {
        self.fpga.stm_start_idx = header
            .fpga_flag
            .contains(FPGAControlFlags::USE_STM_START_IDX)
            .then_some(start_idx);
        self.fpga.stm_finish_idx = header
            .fpga_flag
            .contains(FPGAControlFlags::USE_STM_FINISH_IDX)
            .then_some(finish_idx);
    }

    pub(crate) fn write_focus_stm(&mut self, header: &Header, body: &[U16]) {
        let body = body.as_bytes();

        let (size, offset) = if header.cpu_flag.contains(CPUControlFlags::STM_BEGIN) {
            let Ok((d, _)) = FocusSTMBodyInitial::read_from_prefix(body) else {
                return;
            };
            self.fpga.stm_freq_div = d.freq_div.get();
            self.fpga.sound_speed = d.sound_speed.get();
            self.set_stm_idx(header, d.start_idx.get(), d.finish_idx.get());
            self.fpga.focus_stm_bram.clear();
            self.stm_write = 0;
            (d.size.get() as usize, size_of::<FocusSTMBodyInitial>())
        } else {
            let Ok((d, _)) = FocusSTMBodySubsequent::read_from_prefix(body) else {
                return;
            };
            (d.size.get() as usize, size_of::<FocusSTMBodySubsequent>())
        };

        self.fpga.focus_stm_bram.extend(
            body[offset..]
                .chunks_exact(size_of::<STMFocus>())
                .take(size)
                .filter_map(|c| STMFocus::read_from_bytes(c).ok()),
        );
        self.stm_write += size;

        if header.cpu_flag.contains(CPUControlFlags::STM_END) {
            self.fpga.stm_cycle = self.stm_write;
        }
    }

    pub(crate) fn write_gain_stm(&mut self, header: &Header, body: &[U16]) {
        if header.cpu_flag.contains(CPUControlFlags::STM_BEGIN) {
            let ctl = &header.gain_stm;
            self.fpga.stm_freq_div = ctl.freq_div.get();
            self.fpga.gain_stm_mode = GainSTMMode::from_u16(ctl.mode.get()).unwrap_or_default();
            self.set_stm_idx(header, ctl.start_idx.get(), ctl.finish_idx.get());
            self.fpga.gain_stm_phases.clear();
            self.fpga.gain_stm_duties.clear();
            self.stm_write = 0;
        }

        let n = self.num_transducers;
        if self.fpga.legacy_mode {
            let (phases, duties): (Vec<_>, Vec<_>) = body
                .iter()
                .take(n)
                .map(|w| {
                    let d = LegacyDrive::from_word(w.get());
                    (d.phase as u16, d.duty as u16)
                })
                .unzip();
            self.fpga.gain_stm_phases.push(phases);
            self.fpga.gain_stm_duties.push(duties);
            self.stm_write += 1;
        } else if header.cpu_flag.contains(CPUControlFlags::IS_DUTY) {
            if let Some(duties) = self.fpga.gain_stm_duties.last_mut() {
                duties
                    .iter_mut()
                    .zip(body.iter())
                    .for_each(|(d, w)| *d = w.get());
            }
        } else {
            self.fpga
                .gain_stm_phases
                .push(body.iter().take(n).map(|w| w.get()).collect());
            let duties = match self.fpga.gain_stm_mode {
                GainSTMMode::PhaseDutyFull => vec![0; n],
                GainSTMMode::PhaseFull => self.fpga.cycles.iter().map(|&c| c / 2).collect(),
            };
            self.fpga.gain_stm_duties.push(duties);
            self.stm_write += 1;
        }

        if header.cpu_flag.contains(CPUControlFlags::STM_END) {
            self.fpga.stm_cycle = self.stm_write;
        }
    }
}

#[cfg(test)]
mod tests {
    use aupa_driver::{
        cpu::{MsgId, TxDatagram},
        defined::{mm, METER},
        fpga::{sound_speed_to_fixed, Drive},
        geometry::Vector3,
        operation::{
            stm::{ControlPoint, FocusSTMOp, GainSTMOp},
            Mode, NullHeader, Operation, SyncOp,
        },
    };
    use rand::Rng;

    use crate::CPUEmulator;

    const NUM_TRANS_IN_UNIT: usize = 249;

    fn send<O: Operation>(cpus: &mut [CPUEmulator], tx: &mut TxDatagram, op: &mut O) -> anyhow::Result<usize> {
        let mut calls = 0;
        op.init();
        while !op.is_finished() {
            NullHeader::default().pack(tx)?;
            op.pack(tx)?;
            let mut msg_id = MsgId::new(tx.header().msg_id.max(MsgId::MIN.get()));
            msg_id.increment();
            tx.header_mut().msg_id = msg_id.get();
            cpus.iter_mut().for_each(|cpu| cpu.send(tx));
            calls += 1;
        }
        Ok(calls)
    }

    fn random_point(rng: &mut impl Rng) -> ControlPoint {
        ControlPoint::new(
            Vector3::new(
                rng.random_range(-300.0 * mm..300.0 * mm),
                rng.random_range(-300.0 * mm..300.0 * mm),
                rng.random_range(0.0..300.0 * mm),
            ),
            rng.random_range(0..16),
        )
    }

    #[rstest::rstest]
    #[test]
    #[case(2, None, None)]
    #[case(150, Some(1), None)]
    #[case(1000, None, Some(999))]
    #[case(2000, Some(0), Some(1999))]
    fn focus_stm(
        #[case] size: usize,
        #[case] start_idx: Option<u16>,
        #[case] finish_idx: Option<u16>,
    ) -> anyhow::Result<()> {
        let mut cpus = [
            CPUEmulator::new(0, NUM_TRANS_IN_UNIT),
            CPUEmulator::new(1, NUM_TRANS_IN_UNIT),
        ];
        let mut tx = TxDatagram::new(&[NUM_TRANS_IN_UNIT; 2]);

        let mut rng = rand::rng();
        let points: Vec<Vec<ControlPoint>> = (0..2)
            .map(|_| (0..size).map(|_| random_point(&mut rng)).collect())
            .collect();
        let freq_div = rng.random_range(1612..0xFFFF);
        let sound_speed = 340.0 * METER;

        let mut op = FocusSTMOp::new(points.clone(), freq_div, sound_speed, start_idx, finish_idx);
        send(&mut cpus, &mut tx, &mut op)?;

        cpus.iter().for_each(|cpu| {
            let fpga = cpu.fpga();
            assert!(fpga.is_stm_mode());
            assert!(!fpga.is_stm_gain_mode());
            assert_eq!(size, fpga.stm_cycle());
            assert_eq!(freq_div, fpga.stm_frequency_division());
            assert_eq!(sound_speed_to_fixed(sound_speed), fpga.sound_speed());
            assert_eq!(start_idx, fpga.stm_start_idx());
            assert_eq!(finish_idx, fpga.stm_finish_idx());
            points[cpu.idx()]
                .iter()
                .zip(fpga.focus_stm().iter())
                .for_each(|(p, f)| {
                    assert!((p.point - f.point()).norm() < 0.025e-3 * METER);
                    assert_eq!(p.duty_shift, f.duty_shift());
                });
        });

        Ok(())
    }

    fn random_frames(num_frames: usize, n: usize) -> Vec<Vec<Drive>> {
        let mut rng = rand::rng();
        (0..num_frames)
            .map(|_| {
                (0..n)
                    .map(|_| Drive::new(rng.random_range(0.0..1.0), rng.random_range(0.0..=0.5)))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn gain_stm_legacy() -> anyhow::Result<()> {
        let mut cpus = [
            CPUEmulator::new(0, NUM_TRANS_IN_UNIT),
            CPUEmulator::new(1, NUM_TRANS_IN_UNIT),
        ];
        let mut tx = TxDatagram::new(&[NUM_TRANS_IN_UNIT; 2]);

        let frames = random_frames(5, 2 * NUM_TRANS_IN_UNIT);
        let mut op = GainSTMOp::new(frames.clone(), vec![], Mode::Legacy, 152, None, Some(4));
        assert_eq!(5, send(&mut cpus, &mut tx, &mut op)?);

        cpus.iter().for_each(|cpu| {
            let fpga = cpu.fpga();
            assert!(fpga.is_stm_mode());
            assert!(fpga.is_stm_gain_mode());
            assert!(fpga.is_legacy_mode());
            assert_eq!(5, fpga.stm_cycle());
            assert_eq!(152, fpga.stm_frequency_division());
            assert_eq!(None, fpga.stm_start_idx());
            assert_eq!(Some(4), fpga.stm_finish_idx());
            frames.iter().enumerate().for_each(|(k, frame)| {
                let frame = &frame[cpu.idx() * NUM_TRANS_IN_UNIT..][..NUM_TRANS_IN_UNIT];
                frame
                    .iter()
                    .zip(fpga.gain_stm_phases(k).iter().zip(fpga.gain_stm_duties(k)))
                    .for_each(|(d, (&p, &duty))| {
                        assert_eq!(d.legacy().phase as u16, p);
                        assert_eq!(d.legacy().duty as u16, duty);
                    });
            });
        });

        Ok(())
    }

    #[rstest::rstest]
    #[test]
    #[case(Mode::Normal, 6)]
    #[case(Mode::NormalPhase, 3)]
    fn gain_stm_normal(#[case] mode: Mode, #[case] expected_calls: usize) -> anyhow::Result<()> {
        let mut cpus = [CPUEmulator::new(0, NUM_TRANS_IN_UNIT)];
        let mut tx = TxDatagram::new(&[NUM_TRANS_IN_UNIT]);

        let mut rng = rand::rng();
        let cycles: Vec<u16> = (0..NUM_TRANS_IN_UNIT)
            .map(|_| rng.random_range(2000..4096))
            .collect();
        let mut sync = SyncOp::normal(cycles.clone());
        send(&mut cpus, &mut tx, &mut sync)?;

        let frames = random_frames(3, NUM_TRANS_IN_UNIT);
        let mut op = GainSTMOp::new(frames.clone(), cycles.clone(), mode, 276, None, None);
        assert_eq!(expected_calls, send(&mut cpus, &mut tx, &mut op)?);

        let fpga = cpus[0].fpga();
        assert!(!fpga.is_legacy_mode());
        assert_eq!(3, fpga.stm_cycle());
        frames.iter().enumerate().for_each(|(k, frame)| {
            frame
                .iter()
                .zip(cycles.iter())
                .zip(fpga.gain_stm_phases(k).iter().zip(fpga.gain_stm_duties(k)))
                .for_each(|((d, &c), (&p, &duty))| {
                    assert_eq!(d.phase_word(c), p);
                    match mode {
                        Mode::Normal => assert_eq!(d.duty_word(c), duty),
                        _ => assert_eq!(c / 2, duty),
                    }
                });
        });

        Ok(())
    }
}
