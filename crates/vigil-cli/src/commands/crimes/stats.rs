use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;

use vigil_core::responses::{CrimeStatistics, percent_change};

use crate::cli::GlobalFlags;
use crate::cli::filter_args::FilterArgs;
use crate::output::output;

/// Aggregate counts plus the deltas against the preceding window.
///
/// A `None` delta means the previous window had no incidents, where a
/// percentage is undefined.
#[derive(Serialize)]
pub(crate) struct StatsReport {
    #[serde(flatten)]
    statistics: CrimeStatistics,
    total_change_pct: Option<f64>,
    violent_change_pct: Option<f64>,
    property_change_pct: Option<f64>,
    arrests_change_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_updated_at: Option<DateTime<Utc>>,
}

impl StatsReport {
    pub(crate) fn new(
        statistics: CrimeStatistics,
        last_updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            total_change_pct: percent_change(
                statistics.total_crimes,
                statistics.previous_total_crimes,
            ),
            violent_change_pct: percent_change(
                statistics.violent_crimes,
                statistics.previous_violent_crimes,
            ),
            property_change_pct: percent_change(
                statistics.property_crimes,
                statistics.previous_property_crimes,
            ),
            arrests_change_pct: percent_change(statistics.arrests, statistics.previous_arrests),
            statistics,
            last_updated_at,
        }
    }
}

pub async fn handle(
    args: &FilterArgs,
    flags: &GlobalFlags,
    config: &vigil_config::VigilConfig,
) -> anyhow::Result<()> {
    let store = super::filtered_store(args, config).await?;
    let state = store.fetch_statistics().await;

    if let Some(error) = state.last_error {
        anyhow::bail!("stats fetch failed: {error}");
    }
    let statistics = state
        .statistics
        .context("stats fetch completed without data")?;

    output(
        &StatsReport::new(statistics, state.last_updated_at),
        flags.format,
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use vigil_core::responses::CrimeStatistics;

    use super::StatsReport;

    #[test]
    fn deltas_derive_from_the_previous_window() {
        let statistics = CrimeStatistics {
            total_crimes: 120,
            previous_total_crimes: 100,
            violent_crimes: 30,
            previous_violent_crimes: 40,
            arrests: 5,
            previous_arrests: 0,
            ..CrimeStatistics::default()
        };

        let report = StatsReport::new(statistics, None);
        assert_eq!(report.total_change_pct, Some(20.0));
        assert_eq!(report.violent_change_pct, Some(-25.0));
        assert_eq!(report.arrests_change_pct, None);
    }

    #[test]
    fn report_serializes_counts_and_deltas_side_by_side() {
        let report = StatsReport::new(
            CrimeStatistics {
                total_crimes: 10,
                previous_total_crimes: 10,
                ..CrimeStatistics::default()
            },
            None,
        );

        let value = serde_json::to_value(&report).expect("serialize");
        assert_eq!(value["total_crimes"], 10);
        assert_eq!(value["total_change_pct"], 0.0);
        assert!(value.get("last_updated_at").is_none());
    }
}
