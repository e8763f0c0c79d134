//! Clock port: local wall-clock time for the tariff policy.

use armplug_domain::time::{LocalTime, local_now};

/// Source of the current local time.
pub trait Clock {
    fn now(&self) -> LocalTime;
}

/// The host's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> LocalTime {
        local_now()
    }
}

impl<T: Clock> Clock for std::sync::Arc<T> {
    fn now(&self) -> LocalTime {
        (**self).now()
    }
}
