use serde::Serialize;

use vigil_session::token_store;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    status: String,
    username: Option<String>,
    email: Option<String>,
    organization: Option<String>,
    token_source: Option<String>,
    note: Option<String>,
}

pub async fn handle(flags: &GlobalFlags, config: &vigil_config::VigilConfig) -> anyhow::Result<()> {
    let (session, _) = bootstrap::restored_session(config).await?;
    let state = session.snapshot();

    let response = match state.current_user {
        Some(user) => AuthStatusResponse {
            authenticated: true,
            status: state.status.to_string(),
            username: Some(user.username),
            email: user.email,
            organization: user.organization,
            token_source: token_store::detect_source(),
            note: None,
        },
        None => AuthStatusResponse {
            authenticated: false,
            status: state.status.to_string(),
            username: None,
            email: None,
            organization: None,
            token_source: None,
            note: Some(
                state
                    .last_error
                    .unwrap_or_else(|| "no stored session found".into()),
            ),
        },
    };

    output(&response, flags.format)
}
