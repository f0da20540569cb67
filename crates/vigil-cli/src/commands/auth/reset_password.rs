use anyhow::Context;
use serde::Serialize;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthResetPasswordArgs;
use crate::output::output;

#[derive(Serialize)]
struct AuthResetPasswordResponse {
    email: String,
    stage: &'static str,
}

pub async fn handle(
    args: &AuthResetPasswordArgs,
    flags: &GlobalFlags,
    config: &vigil_config::VigilConfig,
) -> anyhow::Result<()> {
    let client = bootstrap::api_client(config)?;

    let stage = match (&args.token, &args.new_password) {
        (Some(token), Some(new_password)) => {
            client
                .confirm_password_reset(&args.email, token, new_password)
                .await
                .context("password reset confirmation rejected")?;
            "confirmed"
        }
        _ => {
            client
                .request_password_reset(&args.email)
                .await
                .context("password reset request failed")?;
            "requested"
        }
    };

    output(
        &AuthResetPasswordResponse {
            email: args.email.clone(),
            stage,
        },
        flags.format,
    )
}
