use std::time::Instant;

pub use spin_sleep::SpinSleeper;

/// Wait between two attempts of the send loop
pub trait Sleep: std::fmt::Debug + Send {
    /// Sleep until `deadline`; return immediately if it has passed
    fn sleep_until(&self, deadline: Instant);
}

impl Sleep for Box<dyn Sleep> {
    fn sleep_until(&self, deadline: Instant) {
        self.as_ref().sleep_until(deadline);
    }
}

/// Sleeper backed by [`std::thread::sleep`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StdSleeper;

impl Sleep for StdSleeper {
    fn sleep_until(&self, deadline: Instant) {
        std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
    }
}

impl Sleep for SpinSleeper {
    fn sleep_until(&self, deadline: Instant) {
        self.sleep(deadline.saturating_duration_since(Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[rstest::rstest]
    #[test]
    #[case(Box::new(StdSleeper))]
    #[case(Box::new(SpinSleeper::default()))]
    fn sleep_until(#[case] sleeper: Box<dyn Sleep>) {
        let start = Instant::now();
        sleeper.sleep_until(start + Duration::from_millis(5));
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn deadline_passed() {
        let start = Instant::now();
        StdSleeper.sleep_until(start - Duration::from_millis(10));
        SpinSleeper::default().sleep_until(start - Duration::from_millis(10));
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
