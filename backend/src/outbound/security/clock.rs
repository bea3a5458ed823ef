//! Wall-clock adapter.

use chrono::{Local, NaiveDateTime};

use crate::domain::ports::Clock;

/// System clock in local time, matching the timestamps the database
/// assigns with `now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
