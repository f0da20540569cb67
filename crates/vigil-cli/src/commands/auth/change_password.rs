use anyhow::Context;
use serde::Serialize;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthChangePasswordArgs;
use crate::output::output;

#[derive(Serialize)]
struct AuthChangePasswordResponse {
    changed: bool,
}

pub async fn handle(
    args: &AuthChangePasswordArgs,
    flags: &GlobalFlags,
    config: &vigil_config::VigilConfig,
) -> anyhow::Result<()> {
    let (session, client) = bootstrap::restored_session(config).await?;

    if !session.snapshot().is_authenticated() {
        anyhow::bail!("change-password requires a signed-in session; run 'vgl auth login' first");
    }

    client
        .change_password(&args.old_password, &args.new_password)
        .await
        .context("password change rejected")?;

    output(&AuthChangePasswordResponse { changed: true }, flags.format)
}
