//! Analytics response records returned by the platform API.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Incident count for a single category, as emitted by the stats endpoint's
/// `top_crimes` aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryCount {
    #[serde(rename = "category__name")]
    pub category: String,
    pub count: u64,
}

/// Aggregate statistics for the current filter window, paired with the
/// preceding window of equal length for delta rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CrimeStatistics {
    pub total_crimes: u64,
    pub previous_total_crimes: u64,
    pub violent_crimes: u64,
    pub previous_violent_crimes: u64,
    pub property_crimes: u64,
    pub previous_property_crimes: u64,
    pub arrests: u64,
    pub previous_arrests: u64,
    #[serde(default)]
    pub top_crimes: Vec<CategoryCount>,
}

/// Monthly bucket on the trends series. `date` is a `YYYY-MM` label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TrendPoint {
    pub date: String,
    pub total: u64,
    pub violent: u64,
    pub property: u64,
    pub arrests: u64,
}

/// Percent change between a current and a previous value.
///
/// Returns `None` when the previous value is zero, where a percentage is
/// undefined.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percent_change(current: u64, previous: u64) -> Option<f64> {
    if previous == 0 {
        return None;
    }
    let current = current as f64;
    let previous = previous as f64;
    Some((current - previous) / previous * 100.0)
}
