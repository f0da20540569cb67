use chrono::NaiveDate;
use clap::Args;

use vigil_core::enums::{CrimeCategory, TimeWindow};
use vigil_core::filter::{FilterUpdate, GeoPoint};

/// Analytics filter flags shared by stats, trends, and dashboard.
#[derive(Clone, Debug, Args)]
pub struct FilterArgs {
    /// Time window: last24Hours, last7Days, last30Days, lastYear, custom
    #[arg(long)]
    pub window: Option<TimeWindow>,
    /// Start date (YYYY-MM-DD); implies a custom window when --window is absent
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// End date (YYYY-MM-DD); implies a custom window when --window is absent
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// Crime category (repeatable)
    #[arg(long = "category")]
    pub categories: Vec<CrimeCategory>,
    /// Latitude of the area-of-interest centre
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,
    /// Longitude of the area-of-interest centre
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,
    /// Search radius in kilometres around --lat/--lng
    #[arg(long, requires = "lat")]
    pub radius: Option<f64>,
}

impl FilterArgs {
    /// Translate the flags into a partial filter mutation.
    ///
    /// Date bounds without an explicit window select the custom window, so
    /// `--from`/`--to` are usable on their own.
    #[must_use]
    pub fn to_update(&self) -> FilterUpdate {
        let time_window = self
            .window
            .or_else(|| (self.from.is_some() || self.to.is_some()).then_some(TimeWindow::Custom));

        FilterUpdate {
            time_window,
            categories: (!self.categories.is_empty()).then(|| self.categories.clone()),
            start_date: self.from,
            end_date: self.to,
            location: self
                .lat
                .zip(self.lng)
                .map(|(lat, lng)| GeoPoint { lat, lng }),
            radius_km: self.radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use vigil_core::enums::{CrimeCategory, TimeWindow};

    use super::FilterArgs;

    fn bare() -> FilterArgs {
        FilterArgs {
            window: None,
            from: None,
            to: None,
            categories: Vec::new(),
            lat: None,
            lng: None,
            radius: None,
        }
    }

    #[test]
    fn no_flags_produce_an_empty_update() {
        assert!(bare().to_update().is_empty());
    }

    #[test]
    fn date_bounds_imply_the_custom_window() {
        let args = FilterArgs {
            from: NaiveDate::from_ymd_opt(2025, 1, 1),
            to: NaiveDate::from_ymd_opt(2025, 3, 31),
            ..bare()
        };

        let update = args.to_update();
        assert_eq!(update.time_window, Some(TimeWindow::Custom));
        assert_eq!(update.start_date, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(update.end_date, NaiveDate::from_ymd_opt(2025, 3, 31));
    }

    #[test]
    fn explicit_window_wins_over_the_custom_inference() {
        let args = FilterArgs {
            window: Some(TimeWindow::Last7Days),
            from: NaiveDate::from_ymd_opt(2025, 1, 1),
            ..bare()
        };

        assert_eq!(args.to_update().time_window, Some(TimeWindow::Last7Days));
    }

    #[test]
    fn repeated_categories_carry_through_in_order() {
        let args = FilterArgs {
            categories: vec![CrimeCategory::Theft, CrimeCategory::Fraud],
            ..bare()
        };

        assert_eq!(
            args.to_update().categories,
            Some(vec![CrimeCategory::Theft, CrimeCategory::Fraud])
        );
    }

    #[test]
    fn coordinates_pair_into_a_location() {
        let args = FilterArgs {
            lat: Some(40.7128),
            lng: Some(-74.0060),
            radius: Some(2.5),
            ..bare()
        };

        let update = args.to_update();
        let location = update.location.expect("location should be set");
        assert!((location.lat - 40.7128).abs() < f64::EPSILON);
        assert!((location.lng - -74.0060).abs() < f64::EPSILON);
        assert_eq!(update.radius_km, Some(2.5));
    }
}
