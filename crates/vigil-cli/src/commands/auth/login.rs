use anyhow::Context;
use serde::Serialize;

use vigil_session::SessionStore;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    status: String,
    username: String,
    display_name: String,
    remembered: bool,
}

pub async fn handle(
    args: &AuthLoginArgs,
    flags: &GlobalFlags,
    config: &vigil_config::VigilConfig,
) -> anyhow::Result<()> {
    let client = bootstrap::api_client(config)?;
    let session = SessionStore::new(client);

    let remember = super::remember(args.no_remember, config);
    let state = session.login(&args.username, &args.password, remember).await;

    if !state.is_authenticated() {
        anyhow::bail!(
            "login failed: {}",
            state.last_error.as_deref().unwrap_or("unknown error")
        );
    }
    let user = state
        .current_user
        .context("authenticated session is missing its user profile")?;

    output(
        &AuthLoginResponse {
            status: state.status.to_string(),
            username: user.username.clone(),
            display_name: user.display_name(),
            remembered: remember,
        },
        flags.format,
    )
}
