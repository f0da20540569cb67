//! Session state machine types.

use serde::{Deserialize, Serialize};
use std::fmt;

use vigil_core::identity::{Credentials, UserProfile};

/// Lifecycle of the session.
///
/// ```text
/// idle → authenticating → authenticated
///                       → failed → authenticating (retry)
/// authenticated → idle (logout)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Idle,
    Authenticating,
    Authenticated,
    Failed,
}

impl SessionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Authenticating => "authenticating",
            Self::Authenticated => "authenticated",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the session store.
///
/// Invariant: `current_user` and `credentials` are `Some` exactly when
/// `status` is [`SessionStatus::Authenticated`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub status: SessionStatus,
    pub current_user: Option<UserProfile>,
    pub credentials: Option<Credentials>,
    pub last_error: Option<String>,
}

impl SessionState {
    /// Whether the session currently holds a signed-in user.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.status, SessionStatus::Authenticated)
    }
}
