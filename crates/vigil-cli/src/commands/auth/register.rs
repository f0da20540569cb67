use anyhow::Context;
use serde::Serialize;

use vigil_core::identity::NewUser;
use vigil_session::SessionStore;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthRegisterArgs;
use crate::output::output;

#[derive(Serialize)]
struct AuthRegisterResponse {
    status: String,
    username: String,
    email: Option<String>,
    remembered: bool,
}

pub async fn handle(
    args: &AuthRegisterArgs,
    flags: &GlobalFlags,
    config: &vigil_config::VigilConfig,
) -> anyhow::Result<()> {
    let client = bootstrap::api_client(config)?;
    let session = SessionStore::new(client);

    let new_user = NewUser {
        username: args.username.clone(),
        email: args.email.clone(),
        password: args.password.clone(),
    };

    let remember = super::remember(args.no_remember, config);
    let state = session.register(&new_user, remember).await;

    if !state.is_authenticated() {
        anyhow::bail!(
            "registration failed: {}",
            state.last_error.as_deref().unwrap_or("unknown error")
        );
    }
    let user = state
        .current_user
        .context("authenticated session is missing its user profile")?;

    output(
        &AuthRegisterResponse {
            status: state.status.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            remembered: remember,
        },
        flags.format,
    )
}
