//! Cross-cutting error types for Vigil.
//!
//! This module defines errors shared by more than one crate. Domain-specific
//! errors (e.g., `SessionError`, `ConfigError`) live in their respective
//! crates. A unified error surface is deferred to `vigil-cli` where all crate
//! errors converge through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Vigil crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (format, ranges, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors raised by the remote platform API.
///
/// `Unauthorized` is distinguished from the other variants because the
/// session store reacts to it by discarding local credentials.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the request for lack of (valid) credentials.
    #[error("authentication required or credentials rejected")]
    Unauthorized,

    /// The server answered with a non-success status.
    #[error("server error ({status}): {detail}")]
    Server { status: u16, detail: String },

    /// The request never produced a response (connect, timeout, DNS).
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded into the expected shape.
    #[error("response decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether the error indicates the stored credentials are no longer
    /// usable, as opposed to a transient transport or server fault.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
