//! System clock.

use chrono::{Local, NaiveDate};

use crate::port::Clock;

/// [`Clock`] reading the local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
