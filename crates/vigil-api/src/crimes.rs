//! Crime analytics endpoints and the filter-to-query-string translation.

use async_trait::async_trait;

use vigil_core::enums::TimeWindow;
use vigil_core::errors::ApiError;
use vigil_core::filter::QueryFilter;
use vigil_core::responses::{CrimeStatistics, TrendPoint};
use vigil_core::transport::CrimeApi;

use crate::ApiClient;

impl ApiClient {
    /// Aggregate statistics for the given filter.
    ///
    /// # Errors
    ///
    /// Propagates transport, status, and decode failures as [`ApiError`].
    pub async fn statistics(&self, filter: &QueryFilter) -> Result<CrimeStatistics, ApiError> {
        self.get_json("/crimes/stats/", &build_query(filter)).await
    }

    /// Monthly trend series for the given filter.
    ///
    /// # Errors
    ///
    /// Propagates transport, status, and decode failures as [`ApiError`].
    pub async fn trends(&self, filter: &QueryFilter) -> Result<Vec<TrendPoint>, ApiError> {
        self.get_json("/crimes/trends/", &build_query(filter)).await
    }
}

#[async_trait]
impl CrimeApi for ApiClient {
    async fn statistics(&self, filter: &QueryFilter) -> Result<CrimeStatistics, ApiError> {
        Self::statistics(self, filter).await
    }

    async fn trends(&self, filter: &QueryFilter) -> Result<Vec<TrendPoint>, ApiError> {
        Self::trends(self, filter).await
    }
}

/// Translate a filter into the platform's query parameters.
///
/// Absent criteria are omitted entirely; the server applies its own
/// defaults. Custom windows carry explicit `date_from`/`date_to` bounds.
fn build_query(filter: &QueryFilter) -> Vec<(&'static str, String)> {
    let mut query = vec![("time_frame", filter.time_window.as_str().to_owned())];

    if !filter.categories.is_empty() {
        let joined = filter
            .categories
            .iter()
            .map(|category| category.as_str())
            .collect::<Vec<_>>()
            .join(",");
        query.push(("crime_types", joined));
    }

    if filter.time_window == TimeWindow::Custom {
        if let Some(start) = filter.start_date {
            query.push(("date_from", start.to_string()));
        }
        if let Some(end) = filter.end_date {
            query.push(("date_to", end.to_string()));
        }
    }

    if let Some(point) = filter.location {
        query.push(("lat", point.lat.to_string()));
        query.push(("lng", point.lng.to_string()));
        query.push(("radius", filter.radius_km.to_string()));
    }

    query
}
