use std::time::Duration;

use aupa::{
    gain::Focus,
    link::Nop,
    modulation::Sine,
    prelude::{Link, UnitQuaternion, Vector3, AUPA},
    Controller,
};

#[test]
fn nop() -> anyhow::Result<()> {
    let mut cnt = Controller::builder([AUPA::new(Vector3::zeros(), UnitQuaternion::identity())])
        .with_send_interval(Duration::ZERO)
        .open(Nop::new())?;

    assert!(cnt.link().is_open());
    assert!(cnt.send((Sine::new(150.), Focus::new(Vector3::new(90., 70., 150.))))?);

    let infos = cnt.firmware_infos()?;
    assert_eq!(1, infos.len());

    assert!(cnt.close()?);
    assert!(!cnt.link().is_open());

    Ok(())
}
