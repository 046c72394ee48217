use aupa::{
    error::AUPAError,
    gain::Null,
    modulation::Static,
    prelude::{FirmwareInfo, Link, Mode},
};

use crate::create_controller;

#[test]
fn audit_counts_frames() -> anyhow::Result<()> {
    let mut cnt = create_controller(1, Mode::Legacy)?;

    let frames = cnt.link().frames();
    assert!(cnt.send((Static::new(), Null::new()))?);
    assert_eq!(frames + 1, cnt.link().frames());

    Ok(())
}

#[test]
fn audit_break_down() -> anyhow::Result<()> {
    let mut cnt = create_controller(1, Mode::Legacy)?;

    cnt.link_mut().break_down();
    assert!(cnt.link().is_broken());
    assert!(!cnt.send(Null::new())?);
    assert!(cnt.fpga_info().is_err());

    cnt.link_mut().repair();
    assert!(cnt.send(Null::new())?);

    Ok(())
}

#[test]
fn audit_firmware_infos() -> anyhow::Result<()> {
    let mut cnt = create_controller(3, Mode::Legacy)?;

    let infos = cnt.firmware_infos()?;
    assert_eq!(3, infos.len());
    infos.iter().for_each(|info| {
        assert_eq!(FirmwareInfo::LATEST_VERSION_NUM_MAJOR, info.cpu_version_number_major());
        assert_eq!(FirmwareInfo::LATEST_VERSION_NUM_MAJOR, info.fpga_version_number_major());
        assert!(info.is_emulator());
    });

    Ok(())
}

#[test]
fn audit_close() -> anyhow::Result<()> {
    let mut cnt = create_controller(1, Mode::Legacy)?;

    assert!(cnt.close()?);
    assert!(!cnt.link().is_open());
    assert_eq!(
        Err(AUPAError::Driver(aupa::prelude::AUPADriverError::LinkClosed)),
        cnt.send(Null::new())
    );

    Ok(())
}
