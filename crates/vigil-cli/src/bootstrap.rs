//! Construction of configuration, clients, and stores for command handlers.

use std::path::PathBuf;

use anyhow::Context;

use vigil_api::ApiClient;
use vigil_config::VigilConfig;
use vigil_prefs::{PreferenceStore, default_theme_path, detect_ambient};
use vigil_session::SessionStore;

/// Load the layered configuration, `.env` included.
pub fn load_config() -> anyhow::Result<VigilConfig> {
    VigilConfig::load_with_dotenv().context("failed to load vigil configuration")
}

/// Build an unauthenticated API client from the configuration.
pub fn api_client(config: &VigilConfig) -> anyhow::Result<ApiClient> {
    ApiClient::new(&config.api).context("failed to construct the API client")
}

/// Restore any persisted session and derive a bearer-carrying client from it.
///
/// The returned client is unauthenticated when no valid credentials were
/// stored; commands that require a session check the store's snapshot.
pub async fn restored_session(
    config: &VigilConfig,
) -> anyhow::Result<(SessionStore<ApiClient>, ApiClient)> {
    let client = api_client(config)?;
    let session = SessionStore::new(client.clone());

    let state = session.restore().await;
    let client = match state.credentials {
        Some(credentials) => client.with_bearer(credentials.access),
        None => {
            tracing::debug!("no persisted session; continuing unauthenticated");
            client
        }
    };

    Ok((session, client))
}

/// Open the preference store at the configured path, falling back to the
/// standard location, seeded from the terminal's ambient mode.
pub fn preference_store(config: &VigilConfig) -> anyhow::Result<PreferenceStore> {
    let path = if config.general.theme_path.is_empty() {
        default_theme_path().context("cannot resolve the preference file path")?
    } else {
        PathBuf::from(&config.general.theme_path)
    };

    Ok(PreferenceStore::open(path, detect_ambient()))
}
