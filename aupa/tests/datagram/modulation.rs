use aupa::{
    error::AUPAError,
    modulation::{Custom, Modulation, Sine, Static},
    prelude::{AUPADriverError, Mode},
};

use crate::create_controller;

#[test]
fn sine() -> anyhow::Result<()> {
    let mut cnt = create_controller(2, Mode::Legacy)?;

    let m = Sine::new(150.).with_sampling_frequency_division(4096 * 4);
    let expected = m
        .calc()?
        .into_iter()
        .map(aupa::modulation::to_sample)
        .collect::<Vec<_>>();
    assert!(cnt.send(m)?);

    cnt.link().iter().for_each(|cpu| {
        assert_eq!(expected, cpu.fpga().modulation());
        assert_eq!(4096 * 4, cpu.fpga().modulation_frequency_division());
    });

    Ok(())
}

#[test]
fn r#static() -> anyhow::Result<()> {
    let mut cnt = create_controller(1, Mode::Legacy)?;

    assert!(cnt.send(Static::with_amp(1.))?);
    assert_eq!(&[255, 255], cnt.link()[0].fpga().modulation());

    Ok(())
}

#[test]
fn long_custom_spans_frames() -> anyhow::Result<()> {
    let mut cnt = create_controller(1, Mode::Legacy)?;

    let buf = (0..1000).map(|i| (i % 100) as f64 / 100.).collect::<Vec<_>>();
    let expected = buf
        .iter()
        .map(|&a| aupa::modulation::to_sample(a))
        .collect::<Vec<_>>();

    let frames = cnt.link().frames();
    assert!(cnt.send(Custom::new(buf))?);

    assert_eq!(expected, cnt.link()[0].fpga().modulation());
    assert!(cnt.link().frames() - frames > 1);

    Ok(())
}

#[test]
fn freq_div_out_of_range() -> anyhow::Result<()> {
    let mut cnt = create_controller(1, Mode::Legacy)?;

    assert_eq!(
        Err(AUPAError::Driver(AUPADriverError::FreqDivOutOfRange(
            1159, 1160
        ))),
        cnt.send(Custom::new(vec![1.0; 2]).with_sampling_frequency_division(1159))
    );

    Ok(())
}
