mod dashboard;
mod stats;
mod trends;

pub use dashboard::handle as dashboard;
pub use stats::handle as stats;
pub use trends::handle as trends;

use vigil_api::ApiClient;
use vigil_data::CrimeDataStore;

use crate::bootstrap;
use crate::cli::filter_args::FilterArgs;

/// Build a data store over a restored (possibly authenticated) client and
/// apply the command's filter flags.
pub(crate) async fn filtered_store(
    args: &FilterArgs,
    config: &vigil_config::VigilConfig,
) -> anyhow::Result<CrimeDataStore<ApiClient>> {
    let (_, client) = bootstrap::restored_session(config).await?;
    let store = CrimeDataStore::new(client);

    let update = args.to_update();
    if !update.is_empty() {
        store.update_filters(update);
    }

    Ok(store)
}
