//! Analytics query filter: the criteria every statistics and trends request
//! is scoped by.
//!
//! The filter is a plain value type. Stores hold one, merge partial updates
//! into it, and validate it before letting it anywhere near the network.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{CrimeCategory, TimeWindow};
use crate::errors::CoreError;

/// Default search radius around a location, in kilometers.
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Geographic point in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Criteria for an analytics query.
///
/// An empty `categories` list means "no category filtering", not "no
/// categories". `start_date`/`end_date` are only consulted when
/// `time_window` is [`TimeWindow::Custom`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryFilter {
    pub time_window: TimeWindow,
    pub categories: Vec<CrimeCategory>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub location: Option<GeoPoint>,
    pub radius_km: f64,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            time_window: TimeWindow::default(),
            categories: Vec::new(),
            start_date: None,
            end_date: None,
            location: None,
            radius_km: DEFAULT_RADIUS_KM,
        }
    }
}

impl QueryFilter {
    /// Check the filter against its own invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the custom window is missing a
    /// date bound, the date range is inverted, coordinates are outside WGS84
    /// ranges, or the radius is not a positive finite number.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.time_window == TimeWindow::Custom {
            let (Some(start), Some(end)) = (self.start_date, self.end_date) else {
                return Err(CoreError::Validation(
                    "custom time window requires both startDate and endDate".into(),
                ));
            };
            if start > end {
                return Err(CoreError::Validation(format!(
                    "startDate {start} is after endDate {end}"
                )));
            }
        }

        if let Some(point) = self.location {
            if !(-90.0..=90.0).contains(&point.lat) {
                return Err(CoreError::Validation(format!(
                    "latitude {} out of range [-90, 90]",
                    point.lat
                )));
            }
            if !(-180.0..=180.0).contains(&point.lng) {
                return Err(CoreError::Validation(format!(
                    "longitude {} out of range [-180, 180]",
                    point.lng
                )));
            }
        }

        if !self.radius_km.is_finite() || self.radius_km <= 0.0 {
            return Err(CoreError::Validation(format!(
                "radius {} must be a positive number of kilometers",
                self.radius_km
            )));
        }

        Ok(())
    }

    /// Merge a partial update into the filter. Fields the update leaves as
    /// `None` keep their current value; clearing a field is done through
    /// [`Self::reset`].
    pub fn apply(&mut self, update: FilterUpdate) {
        if let Some(window) = update.time_window {
            self.time_window = window;
        }
        if let Some(categories) = update.categories {
            self.categories = categories;
        }
        if let Some(start) = update.start_date {
            self.start_date = Some(start);
        }
        if let Some(end) = update.end_date {
            self.end_date = Some(end);
        }
        if let Some(location) = update.location {
            self.location = Some(location);
        }
        if let Some(radius) = update.radius_km {
            self.radius_km = radius;
        }
    }

    /// Restore the documented defaults, discarding every prior mutation.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Partial filter mutation. Every field is optional; absent fields leave the
/// target filter untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterUpdate {
    pub time_window: Option<TimeWindow>,
    pub categories: Option<Vec<CrimeCategory>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub location: Option<GeoPoint>,
    pub radius_km: Option<f64>,
}

impl FilterUpdate {
    /// Whether the update carries no changes at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.time_window.is_none()
            && self.categories.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.location.is_none()
            && self.radius_km.is_none()
    }
}
