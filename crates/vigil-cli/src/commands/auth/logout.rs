use serde::Serialize;

use vigil_session::SessionStore;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    signed_out: bool,
}

pub async fn handle(flags: &GlobalFlags, config: &vigil_config::VigilConfig) -> anyhow::Result<()> {
    let client = bootstrap::api_client(config)?;
    let session = SessionStore::new(client);

    // Pick up persisted credentials so the refresh token can be revoked
    // server-side before everything is cleared.
    session.restore().await;
    session.logout().await;

    output(&AuthLogoutResponse { signed_out: true }, flags.format)
}
