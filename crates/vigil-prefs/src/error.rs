use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("preference storage error: {0}")]
    Storage(String),
}
