use aupa::{
    error::AUPAError,
    gain::{Custom, Focus, Null, Uniform},
    prelude::{Drive, Mode, Vector3},
};

use crate::create_controller;

#[test]
fn uniform_legacy() -> anyhow::Result<()> {
    let mut cnt = create_controller(2, Mode::Legacy)?;

    assert!(cnt.send(Uniform::new(1.).with_phase(0.5))?);

    cnt.link().iter().for_each(|cpu| {
        assert!(cpu.fpga().is_legacy_mode());
        assert!(cpu.fpga().phases().iter().all(|&p| p == 128));
        assert!(cpu.fpga().duties().iter().all(|&d| d == 128));
    });

    Ok(())
}

#[test]
fn uniform_normal() -> anyhow::Result<()> {
    let mut cnt = create_controller(2, Mode::Normal)?;

    assert!(cnt.send(Uniform::new(1.).with_phase(0.25))?);

    cnt.link().iter().for_each(|cpu| {
        assert!(!cpu.fpga().is_legacy_mode());
        assert!(cpu.fpga().phases().iter().all(|&p| p == 1024));
        assert!(cpu.fpga().duties().iter().all(|&d| d == 2048));
    });

    Ok(())
}

#[test]
fn null() -> anyhow::Result<()> {
    let mut cnt = create_controller(1, Mode::Legacy)?;

    assert!(cnt.send(Uniform::new(1.))?);
    assert!(cnt.send(Null::new())?);

    assert!(cnt.link()[0].fpga().duties().iter().all(|&d| d == 0));

    Ok(())
}

#[test]
fn focus() -> anyhow::Result<()> {
    let mut cnt = create_controller(2, Mode::Legacy)?;

    let center = cnt.geometry().center();
    let g = Focus::new(center + Vector3::new(0., 0., 150.));
    let expected = {
        use aupa::gain::Gain;
        g.calc(cnt.geometry())?
    };
    assert!(cnt.send(g)?);

    cnt.link().iter().enumerate().for_each(|(i, cpu)| {
        cpu.fpga()
            .phases()
            .iter()
            .zip(expected[&i].iter())
            .for_each(|(&p, d)| assert_eq!(d.legacy().phase as u16, p));
    });

    Ok(())
}

#[test]
fn custom_partial() -> anyhow::Result<()> {
    let mut cnt = create_controller(2, Mode::Legacy)?;

    let n = cnt.geometry()[1].num_transducers();
    assert!(cnt.send(Custom::new().set(1, vec![Drive::new(0.25, 0.5); n]))?);

    assert!(cnt.link()[0].fpga().duties().iter().all(|&d| d == 0));
    assert!(cnt.link()[1].fpga().phases().iter().all(|&p| p == 64));
    assert!(cnt.link()[1].fpga().duties().iter().all(|&d| d == 128));

    Ok(())
}

#[test]
fn custom_invalid() -> anyhow::Result<()> {
    let mut cnt = create_controller(1, Mode::Legacy)?;

    assert_eq!(
        Err(AUPAError::GainError("Device 3 is not connected".to_string())),
        cnt.send(Custom::new().set(3, vec![Drive::null(); 249]))
    );

    Ok(())
}
