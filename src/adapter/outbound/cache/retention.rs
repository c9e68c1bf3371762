//! Retention rule shared by cache stores.

use chrono::{Days, NaiveDate};

use crate::port::CacheEntry;

/// Drop entries fetched before `today - days_to_keep`.
///
/// The newest entry always survives, however old. `entries` must be
/// sorted oldest first. Returns the number of entries removed.
pub fn prune_entries(entries: &mut Vec<CacheEntry>, today: NaiveDate, days_to_keep: u32) -> usize {
    let Some(newest) = entries.last().map(|entry| entry.fetched_at) else {
        return 0;
    };
    let cutoff = today
        .checked_sub_days(Days::new(u64::from(days_to_keep)))
        .unwrap_or(NaiveDate::MIN);

    let before = entries.len();
    entries.retain(|entry| entry.fetched_at >= cutoff || entry.fetched_at == newest);
    before - entries.len()
}
