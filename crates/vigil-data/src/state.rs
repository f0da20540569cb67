//! Fetch result pair and its bookkeeping fields.

use chrono::{DateTime, Utc};

use vigil_core::responses::{CrimeStatistics, TrendPoint};

/// Snapshot of the data store's fetched results.
///
/// `statistics` and `trends` stay `None` until their first successful fetch.
/// `last_error` and a fresh successful result are mutually exclusive for any
/// single request: success clears the error, failure leaves the previous
/// results untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataState {
    pub statistics: Option<CrimeStatistics>,
    pub trends: Option<Vec<TrendPoint>>,
    pub is_loading: bool,
    pub last_error: Option<String>,
    pub last_updated_at: Option<DateTime<Utc>>,
}

impl DataState {
    /// Whether any result set has landed yet.
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.statistics.is_some() || self.trends.is_some()
    }
}
