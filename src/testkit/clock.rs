//! Settable clock.

use chrono::{Days, NaiveDate};
use parking_lot::Mutex;

use crate::port::Clock;

/// A [`Clock`] frozen on a date until moved.
#[derive(Debug)]
pub struct FixedClock {
    today: Mutex<NaiveDate>,
}

impl FixedClock {
    /// Clock fixed on the given date.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    /// Clock fixed on `year-month-day`.
    pub fn at(year: i32, month: u32, day: u32) -> Self {
        Self::new(Self::date(year, month, day))
    }

    /// Shorthand for a valid calendar date.
    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
    }

    /// Move the clock forward by whole days.
    pub fn advance_days(&self, days: u64) {
        let mut today = self.today.lock();
        *today = *today + Days::new(days);
    }

    /// Jump to a specific date.
    pub fn set(&self, date: NaiveDate) {
        *self.today.lock() = date;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock()
    }
}
