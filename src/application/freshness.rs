//! Daily freshness policy.
//!
//! A snapshot is current for the local calendar day it was fetched on and
//! stale from the next day onward. Evaluation is pure: callers pass the
//! date from their [`Clock`](crate::port::Clock).

use chrono::NaiveDate;
use serde::Serialize;

/// Freshness of a snapshot relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Freshness {
    /// No snapshot has been fetched.
    Missing,
    /// Fetched today.
    Current,
    /// Fetched on another day. `age_days` is negative if the clock moved
    /// backwards.
    Stale { age_days: i64 },
}

impl Freshness {
    #[must_use]
    pub const fn is_current(self) -> bool {
        matches!(self, Self::Current)
    }
}

/// Decides when the catalog must be re-fetched: at most once per day.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreshnessPolicy;

impl FreshnessPolicy {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Classify a snapshot fetched on `last_fetched_on`.
    #[must_use]
    pub fn evaluate(&self, last_fetched_on: Option<NaiveDate>, today: NaiveDate) -> Freshness {
        match last_fetched_on {
            None => Freshness::Missing,
            Some(date) if date == today => Freshness::Current,
            Some(date) => Freshness::Stale {
                age_days: (today - date).num_days(),
            },
        }
    }

    /// True unless the snapshot was fetched today.
    #[must_use]
    pub fn needs_refresh(&self, last_fetched_on: Option<NaiveDate>, today: NaiveDate) -> bool {
        !self.evaluate(last_fetched_on, today).is_current()
    }

    /// [`needs_refresh`](Self::needs_refresh) with an override that always refreshes.
    #[must_use]
    pub fn should_refresh(
        &self,
        last_fetched_on: Option<NaiveDate>,
        today: NaiveDate,
        force: bool,
    ) -> bool {
        force || self.needs_refresh(last_fetched_on, today)
    }
}
