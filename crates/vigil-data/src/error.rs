use thiserror::Error;

use vigil_core::errors::{ApiError, CoreError};

#[derive(Debug, Error)]
pub enum DataError {
    /// The filter violates its own invariants; nothing was sent.
    #[error("invalid filter: {0}")]
    InvalidFilter(#[from] CoreError),

    /// The remote service failed; the caller may retry by re-invoking.
    #[error(transparent)]
    Api(#[from] ApiError),
}
