use std::time::Duration;

use approx::assert_abs_diff_eq;
use aupa::{
    datagram::IntoDatagramWithTimeout,
    error::AUPAError,
    gain::{Null, Uniform},
    prelude::{AUPADriverError, GainSTMMode, Mode, Vector3},
    stm::{FocusSTM, GainSTM},
};

use crate::create_controller;

#[test]
fn focus_stm() -> anyhow::Result<()> {
    let mut cnt = create_controller(1, Mode::Legacy)?;

    let points = (0..200)
        .map(|i| {
            let theta = 2. * std::f64::consts::PI * i as f64 / 200.;
            Vector3::new(30. * theta.cos() + 90., 30. * theta.sin() + 70., 150.)
        })
        .collect::<Vec<_>>();
    let stm = FocusSTM::from_sampling_frequency_division(4096)
        .add_foci_from_iter(points.clone())
        .with_start_idx(Some(10))
        .with_timeout(Duration::from_secs(1));
    assert!(cnt.send(stm)?);

    let fpga = cnt.link()[0].fpga();
    assert!(fpga.is_stm_mode());
    assert!(!fpga.is_stm_gain_mode());
    assert_eq!(4096, fpga.stm_frequency_division());
    assert_eq!(Some(10), fpga.stm_start_idx());
    assert_eq!(None, fpga.stm_finish_idx());
    assert_eq!(200, fpga.stm_cycle());
    fpga.focus_stm().iter().zip(points.iter()).for_each(|(f, p)| {
        let actual = f.point();
        assert_abs_diff_eq!(p.x, actual.x, epsilon = 0.025);
        assert_abs_diff_eq!(p.y, actual.y, epsilon = 0.025);
        assert_abs_diff_eq!(p.z, actual.z, epsilon = 0.025);
    });

    Ok(())
}

#[test]
fn focus_stm_too_few_points() -> anyhow::Result<()> {
    let mut cnt = create_controller(1, Mode::Legacy)?;

    assert_eq!(
        Err(AUPAError::Driver(
            AUPADriverError::FocusSTMPointSizeOutOfRange(1)
        )),
        cnt.send(FocusSTM::from_sampling_frequency_division(4096).add_focus(Vector3::zeros()))
    );

    Ok(())
}

#[test]
fn gain_stm_legacy() -> anyhow::Result<()> {
    let mut cnt = create_controller(2, Mode::Legacy)?;

    let stm = GainSTM::from_sampling_frequency_division(4096)
        .add_gain(Uniform::new(1.).with_phase(0.5))
        .add_gain(Null::new())
        .add_gain(Uniform::new(1.).with_phase(0.25))
        .with_finish_idx(Some(2));
    assert!(cnt.send(stm)?);

    cnt.link().iter().for_each(|cpu| {
        let fpga = cpu.fpga();
        assert!(fpga.is_stm_mode());
        assert!(fpga.is_stm_gain_mode());
        assert_eq!(3, fpga.stm_cycle());
        assert_eq!(Some(2), fpga.stm_finish_idx());
        assert!(fpga.gain_stm_phases(0).iter().all(|&p| p == 128));
        assert!(fpga.gain_stm_duties(1).iter().all(|&d| d == 0));
        assert!(fpga.gain_stm_phases(2).iter().all(|&p| p == 64));
    });

    Ok(())
}

#[test]
fn gain_stm_normal() -> anyhow::Result<()> {
    let mut cnt = create_controller(1, Mode::Normal)?;

    let stm = GainSTM::from_sampling_frequency_division(4096)
        .add_gains_from_iter([0.25, 0.5].map(|p| Uniform::new(1.).with_phase(p)));
    assert!(cnt.send(stm)?);

    let fpga = cnt.link()[0].fpga();
    assert_eq!(GainSTMMode::PhaseDutyFull, fpga.gain_stm_mode());
    assert_eq!(2, fpga.stm_cycle());
    assert!(fpga.gain_stm_phases(0).iter().all(|&p| p == 1024));
    assert!(fpga.gain_stm_phases(1).iter().all(|&p| p == 2048));
    assert!(fpga.gain_stm_duties(0).iter().all(|&d| d == 2048));

    Ok(())
}

#[test]
fn gain_stm_normal_phase() -> anyhow::Result<()> {
    let mut cnt = create_controller(1, Mode::NormalPhase)?;

    let stm = GainSTM::from_sampling_frequency_division(4096)
        .add_gains_from_iter([0.25, 0.5].map(|p| Uniform::new(1.).with_phase(p)));
    assert!(cnt.send(stm)?);

    let fpga = cnt.link()[0].fpga();
    assert_eq!(GainSTMMode::PhaseFull, fpga.gain_stm_mode());
    assert_eq!(2, fpga.stm_cycle());
    assert!(fpga.gain_stm_duties(1).iter().all(|&d| d == 2048));

    Ok(())
}
