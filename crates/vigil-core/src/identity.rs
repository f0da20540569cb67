//! User identity and credential types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Account profile as returned by the platform's `/auth/me/` endpoint.
///
/// Only the fields the client surface actually consumes are modeled;
/// unknown fields in the payload are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub is_agency_user: bool,
}

impl UserProfile {
    /// Human-facing name: "First Last" when available, username otherwise.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => {
                format!("{first} {last}")
            }
            (Some(first), _) if !first.is_empty() => first.to_owned(),
            _ => self.username.clone(),
        }
    }
}

/// Bearer token pair issued on login or registration.
///
/// The refresh token is absent when credentials were sourced from an
/// environment variable rather than a full login response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Credentials {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Successful authentication response: the profile plus its token pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AuthSession {
    pub user: UserProfile,
    #[serde(flatten)]
    pub credentials: Credentials,
}

/// Payload for account registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{AuthSession, UserProfile};

    fn profile(first: Option<&str>, last: Option<&str>) -> UserProfile {
        UserProfile {
            id: 7,
            username: "jdoe".into(),
            email: None,
            first_name: first.map(str::to_owned),
            last_name: last.map(str::to_owned),
            organization: None,
            is_agency_user: false,
        }
    }

    #[test]
    fn display_name_prefers_full_name() {
        assert_eq!(profile(Some("Jane"), Some("Doe")).display_name(), "Jane Doe");
        assert_eq!(profile(Some("Jane"), None).display_name(), "Jane");
        assert_eq!(profile(None, None).display_name(), "jdoe");
        assert_eq!(profile(Some(""), Some("")).display_name(), "jdoe");
    }

    #[test]
    fn auth_session_flattens_token_pair() {
        let payload = serde_json::json!({
            "user": {"id": 7, "username": "jdoe"},
            "access": "acc-token",
            "refresh": "ref-token",
        });
        let session: AuthSession = serde_json::from_value(payload).expect("deserialize");
        assert_eq!(session.user.username, "jdoe");
        assert_eq!(session.credentials.access, "acc-token");
        assert_eq!(session.credentials.refresh.as_deref(), Some("ref-token"));
    }

    #[test]
    fn auth_session_tolerates_missing_refresh_and_extra_fields() {
        let payload = serde_json::json!({
            "user": {"id": 7, "username": "jdoe", "avatar": "x.png"},
            "access": "acc-token",
        });
        let session: AuthSession = serde_json::from_value(payload).expect("deserialize");
        assert_eq!(session.credentials.refresh, None);
    }
}
