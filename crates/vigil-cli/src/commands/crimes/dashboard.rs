use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;

use vigil_core::responses::TrendPoint;

use crate::cli::GlobalFlags;
use crate::cli::filter_args::FilterArgs;
use crate::output::output;

use super::stats::StatsReport;

/// Both result sets from one all-or-nothing fetch, so the statistics and the
/// series always describe the same query.
#[derive(Serialize)]
struct DashboardResponse {
    statistics: StatsReport,
    trends: Vec<TrendPoint>,
    last_updated_at: Option<DateTime<Utc>>,
}

pub async fn handle(
    args: &FilterArgs,
    flags: &GlobalFlags,
    config: &vigil_config::VigilConfig,
) -> anyhow::Result<()> {
    let store = super::filtered_store(args, config).await?;
    let state = store.fetch_all().await;

    if let Some(error) = state.last_error {
        anyhow::bail!("dashboard fetch failed: {error}");
    }
    let statistics = state
        .statistics
        .context("dashboard fetch completed without statistics")?;
    let trends = state
        .trends
        .context("dashboard fetch completed without trends")?;

    output(
        &DashboardResponse {
            statistics: StatsReport::new(statistics, None),
            trends,
            last_updated_at: state.last_updated_at,
        },
        flags.format,
    )
}
