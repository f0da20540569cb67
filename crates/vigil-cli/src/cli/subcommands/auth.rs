use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in with username and password.
    Login(AuthLoginArgs),
    /// Revoke the session and clear stored credentials.
    Logout,
    /// Show current session status.
    Status,
    /// Create an account and sign in.
    Register(AuthRegisterArgs),
    /// Request or confirm a password reset.
    ResetPassword(AuthResetPasswordArgs),
    /// Change the signed-in account's password.
    ChangePassword(AuthChangePasswordArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    /// Account username.
    pub username: String,
    /// Account password.
    #[arg(long)]
    pub password: String,
    /// Do not persist credentials for later sessions.
    #[arg(long)]
    pub no_remember: bool,
}

#[derive(Clone, Debug, Args)]
pub struct AuthRegisterArgs {
    /// Username for the new account.
    pub username: String,
    /// Contact email address.
    #[arg(long)]
    pub email: String,
    /// Password for the new account.
    #[arg(long)]
    pub password: String,
    /// Do not persist credentials for later sessions.
    #[arg(long)]
    pub no_remember: bool,
}

#[derive(Clone, Debug, Args)]
pub struct AuthResetPasswordArgs {
    /// Account email address.
    pub email: String,
    /// Reset token from the email (switches to the confirm step).
    #[arg(long, requires = "new_password")]
    pub token: Option<String>,
    /// Replacement password (required with --token).
    #[arg(long, requires = "token")]
    pub new_password: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AuthChangePasswordArgs {
    /// Current password.
    #[arg(long)]
    pub old_password: String,
    /// Replacement password.
    #[arg(long)]
    pub new_password: String,
}
