mod change_password;
mod login;
mod logout;
mod register;
mod reset_password;
mod status;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;

/// Handle `vgl auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    flags: &GlobalFlags,
    config: &vigil_config::VigilConfig,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login::handle(args, flags, config).await,
        AuthCommands::Logout => logout::handle(flags, config).await,
        AuthCommands::Status => status::handle(flags, config).await,
        AuthCommands::Register(args) => register::handle(args, flags, config).await,
        AuthCommands::ResetPassword(args) => reset_password::handle(args, flags, config).await,
        AuthCommands::ChangePassword(args) => change_password::handle(args, flags, config).await,
    }
}

/// Per-call persistence choice: the flag opts out, the config sets the
/// default.
pub(crate) const fn remember(no_remember: bool, config: &vigil_config::VigilConfig) -> bool {
    if no_remember { false } else { config.general.remember }
}
