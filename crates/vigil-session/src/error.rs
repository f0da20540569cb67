use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("credential store error: {0}")]
    CredentialStore(String),

    #[error("token format error: {0}")]
    TokenFormat(String),
}
