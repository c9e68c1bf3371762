//! Time source port.

use chrono::NaiveDate;

/// Source of the current local calendar date.
///
/// Freshness and retention are evaluated at day granularity, so the
/// clock only needs to answer "what day is it here".
pub trait Clock: Send + Sync {
    /// Today's date in local time.
    fn today(&self) -> NaiveDate;
}
