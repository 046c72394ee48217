use aupa::{
    datagram::Silencer,
    error::AUPAError,
    prelude::{AUPADriverError, Mode},
};

use crate::create_controller;

#[test]
fn config_silencer() -> anyhow::Result<()> {
    let mut cnt = create_controller(2, Mode::Legacy)?;

    assert!(cnt.send(Silencer::new(2048, 20))?);
    cnt.link().iter().for_each(|cpu| {
        assert_eq!(2048, cpu.fpga().silencer_cycle());
        assert_eq!(20, cpu.fpga().silencer_step());
    });

    assert!(cnt.send(Silencer::default())?);
    cnt.link().iter().for_each(|cpu| {
        assert_eq!(4096, cpu.fpga().silencer_cycle());
        assert_eq!(10, cpu.fpga().silencer_step());
    });

    Ok(())
}

#[test]
fn cycle_out_of_range() -> anyhow::Result<()> {
    let mut cnt = create_controller(1, Mode::Legacy)?;

    assert_eq!(
        Err(AUPAError::Driver(AUPADriverError::SilencerCycleOutOfRange(
            1000
        ))),
        cnt.send(Silencer::new(1000, 10))
    );
    assert_eq!(4096, cnt.link()[0].fpga().silencer_cycle());

    Ok(())
}
