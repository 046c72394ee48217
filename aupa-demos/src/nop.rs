mod tests;

use anyhow::Result;

use aupa::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let cnt = Controller::builder([
        AUPA::new(Vector3::zeros(), UnitQuaternion::identity()),
        AUPA::new(
            Vector3::new(AUPA::DEVICE_WIDTH, 0., 0.),
            UnitQuaternion::identity(),
        ),
    ])
    .open(Nop::new())?;

    tests::run(cnt)
}
