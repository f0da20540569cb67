//! The filtered data store: filter state plus statistics/trends fetching.

use std::sync::Mutex;

use chrono::Utc;

use vigil_core::filter::{FilterUpdate, QueryFilter};
use vigil_core::transport::CrimeApi;

use crate::error::DataError;
use crate::state::DataState;

/// Analytics state machine over a [`CrimeApi`] transport.
///
/// All methods take `&self`; interior state lives behind a `Mutex` that is
/// never held across an await point. Overlapping fetches are neither queued
/// nor cancelled: when two requests for different filter snapshots are in
/// flight, the last response to resolve wins. Callers that need ordering
/// serialize their fetch calls.
pub struct CrimeDataStore<A> {
    api: A,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    filter: QueryFilter,
    state: DataState,
}

impl<A: CrimeApi> CrimeDataStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Current results and bookkeeping, cloned.
    #[must_use]
    pub fn snapshot(&self) -> DataState {
        self.lock().state.clone()
    }

    /// Current filter, cloned.
    #[must_use]
    pub fn filter(&self) -> QueryFilter {
        self.lock().filter.clone()
    }

    /// Shallow-merge a partial update into the filter.
    ///
    /// Never triggers a fetch: callers batch several edits and then invoke
    /// one fetch operation explicitly.
    pub fn update_filters(&self, update: FilterUpdate) {
        self.lock().filter.apply(update);
    }

    /// Restore the documented default filter.
    pub fn reset_filters(&self) {
        self.lock().filter.reset();
    }

    /// Fetch aggregate statistics for the current filter.
    pub async fn fetch_statistics(&self) -> DataState {
        let Some(filter) = self.begin_fetch() else {
            return self.snapshot();
        };
        let result = self.api.statistics(&filter).await;

        let mut inner = self.lock();
        inner.state.is_loading = false;
        match result {
            Ok(statistics) => {
                inner.state.statistics = Some(statistics);
                inner.state.last_updated_at = Some(Utc::now());
                inner.state.last_error = None;
            }
            Err(error) => {
                tracing::warn!(%error, "statistics fetch failed");
                inner.state.last_error = Some(DataError::from(error).to_string());
            }
        }
        inner.state.clone()
    }

    /// Fetch the monthly trend series for the current filter.
    pub async fn fetch_trends(&self) -> DataState {
        let Some(filter) = self.begin_fetch() else {
            return self.snapshot();
        };
        let result = self.api.trends(&filter).await;

        let mut inner = self.lock();
        inner.state.is_loading = false;
        match result {
            Ok(trends) => {
                inner.state.trends = Some(trends);
                inner.state.last_updated_at = Some(Utc::now());
                inner.state.last_error = None;
            }
            Err(error) => {
                tracing::warn!(%error, "trends fetch failed");
                inner.state.last_error = Some(DataError::from(error).to_string());
            }
        }
        inner.state.clone()
    }

    /// Fetch statistics and trends concurrently, all-or-nothing.
    ///
    /// Both requests use the same filter snapshot. If either fails, neither
    /// result is applied and `last_error` carries the failure, so the two
    /// result sets always describe the same query.
    pub async fn fetch_all(&self) -> DataState {
        let Some(filter) = self.begin_fetch() else {
            return self.snapshot();
        };
        let (statistics, trends) =
            tokio::join!(self.api.statistics(&filter), self.api.trends(&filter));

        let mut inner = self.lock();
        inner.state.is_loading = false;
        match (statistics, trends) {
            (Ok(statistics), Ok(trends)) => {
                inner.state.statistics = Some(statistics);
                inner.state.trends = Some(trends);
                inner.state.last_updated_at = Some(Utc::now());
                inner.state.last_error = None;
            }
            (statistics, trends) => {
                let error = statistics
                    .err()
                    .or_else(|| trends.err())
                    .map_or_else(|| "combined fetch failed".to_owned(), |e| e.to_string());
                tracing::warn!(error, "combined fetch failed; discarding partial results");
                inner.state.last_error = Some(error);
            }
        }
        inner.state.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Validate the filter snapshot and mark the store loading.
    ///
    /// An invalid filter is recorded as `last_error` and never sent.
    fn begin_fetch(&self) -> Option<QueryFilter> {
        let mut inner = self.lock();
        let filter = inner.filter.clone();
        if let Err(error) = filter.validate() {
            let error = DataError::from(error);
            tracing::debug!(%error, "rejecting fetch for invalid filter");
            inner.state.last_error = Some(error.to_string());
            return None;
        }
        inner.state.is_loading = true;
        inner.state.last_error = None;
        Some(filter)
    }
}
