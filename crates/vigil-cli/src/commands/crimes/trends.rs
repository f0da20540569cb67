use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::filter_args::FilterArgs;
use crate::output::output;

pub async fn handle(
    args: &FilterArgs,
    flags: &GlobalFlags,
    config: &vigil_config::VigilConfig,
) -> anyhow::Result<()> {
    let store = super::filtered_store(args, config).await?;
    let state = store.fetch_trends().await;

    if let Some(error) = state.last_error {
        anyhow::bail!("trends fetch failed: {error}");
    }
    let trends = state.trends.context("trends fetch completed without data")?;

    output(&trends, flags.format)
}
