//! Local wall-clock time.

use chrono::{Local, NaiveDateTime};

/// Wall-clock reading in the device's local time zone.
///
/// Tariff windows and job timespecs are defined in local time.
pub type LocalTime = NaiveDateTime;

/// Return the current local wall-clock time.
#[must_use]
pub fn local_now() -> LocalTime {
    Local::now().naive_local()
}
