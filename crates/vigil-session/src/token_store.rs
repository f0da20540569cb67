//! Durable credential storage.
//!
//! Three tiers, consulted in order: OS keychain, `VIGIL_AUTH__TOKEN`
//! environment variable (access token only, for CI and scripts), and a JSON
//! file at `~/.vigil/credentials` (0600, parent 0700 on Unix). Keyring
//! failures degrade to the file tier with a warning.

use std::fs;
use std::path::PathBuf;

use vigil_core::identity::Credentials;

use crate::error::SessionError;

const DEFAULT_KEYRING_SERVICE: &str = "vigil-cli";
const KEYRING_USER: &str = "session-credentials";
const CREDENTIALS_FILE_NAME: &str = "credentials";
const ENV_TOKEN_VAR: &str = "VIGIL_AUTH__TOKEN";

/// Returns the keyring service name.
///
/// Defaults to `"vigil-cli"`. Override via `VIGIL_KEYRING_SERVICE` env var
/// for testing (e.g., `"vigil-cli-test"`) to avoid touching production
/// credentials.
fn keyring_service() -> String {
    std::env::var("VIGIL_KEYRING_SERVICE")
        .unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Store a credential pair in the OS keychain. Falls back to file if the
/// keyring is unavailable.
///
/// # Errors
///
/// Returns [`SessionError::CredentialStore`] if both keyring and file
/// storage fail.
pub fn store(credentials: &Credentials) -> Result<(), SessionError> {
    let json = serde_json::to_string(credentials)
        .map_err(|e| SessionError::CredentialStore(format!("serialize credentials: {e}")))?;

    match keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        Ok(entry) => match entry.set_password(&json) {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
                store_file(&json)
            }
        },
        Err(error) => {
            tracing::warn!(%error, "keyring unavailable; falling back to file");
            store_file(&json)
        }
    }
}

/// Load stored credentials. Priority: keyring → `VIGIL_AUTH__TOKEN` env →
/// file (`~/.vigil/credentials`).
///
/// The env tier carries a bare access token, so it yields credentials with
/// no refresh half.
#[must_use]
pub fn load() -> Option<Credentials> {
    // 1. Keyring
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER)
        && let Ok(json) = entry.get_password()
        && !json.is_empty()
    {
        match serde_json::from_str(&json) {
            Ok(credentials) => return Some(credentials),
            Err(error) => {
                tracing::warn!(%error, "stored keyring entry is not valid JSON; ignoring");
            }
        }
    }

    // 2. Environment variable
    if let Ok(token) = std::env::var(ENV_TOKEN_VAR) {
        if !token.is_empty() {
            return Some(Credentials {
                access: token,
                refresh: None,
            });
        }
    }

    // 3. File fallback
    load_file()
}

/// Delete stored credentials from keyring and file.
///
/// # Errors
///
/// Returns [`SessionError::CredentialStore`] if the credentials file cannot
/// be removed.
pub fn delete() -> Result<(), SessionError> {
    // Delete from keyring (ignore errors — may not exist)
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        let _ = entry.delete_credential();
    }

    // Delete credentials file
    let path = credentials_path()?;
    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            SessionError::CredentialStore(format!("failed to delete {}: {e}", path.display()))
        })?;
    }

    Ok(())
}

/// Detect which tier the current credentials came from (for status display).
#[must_use]
pub fn detect_source() -> Option<String> {
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER)
        && entry.get_password().is_ok_and(|json| !json.is_empty())
    {
        return Some("keyring".into());
    }
    if std::env::var(ENV_TOKEN_VAR).is_ok_and(|t| !t.is_empty()) {
        return Some("env".into());
    }
    if load_file().is_some() {
        return Some("file".into());
    }
    None
}

// --- Private file helpers ---

fn credentials_path() -> Result<PathBuf, SessionError> {
    dirs::home_dir()
        .map(|h| h.join(".vigil").join(CREDENTIALS_FILE_NAME))
        .ok_or_else(|| {
            SessionError::CredentialStore(
                "home directory not found; cannot store credentials".into(),
            )
        })
}

fn store_file(json: &str) -> Result<(), SessionError> {
    let path = credentials_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            SessionError::CredentialStore(format!("mkdir {}: {e}", parent.display()))
        })?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(&path, json)
        .map_err(|e| SessionError::CredentialStore(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600))
            .map_err(|e| SessionError::CredentialStore(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

fn load_file() -> Option<Credentials> {
    let path = credentials_path().ok()?;
    let json = fs::read_to_string(&path)
        .ok()
        .filter(|s| !s.trim().is_empty())?;
    match serde_json::from_str(&json) {
        Ok(credentials) => Some(credentials),
        Err(error) => {
            tracing::warn!(%error, path = %path.display(), "credentials file is not valid JSON; ignoring");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_path_is_under_home() {
        let path = credentials_path().expect("should resolve");
        assert!(path.ends_with(".vigil/credentials"));
    }

    #[test]
    fn file_round_trip_preserves_token_pair() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let creds_path = tmp.path().join("credentials");

        let credentials = Credentials {
            access: "acc-token".into(),
            refresh: Some("ref-token".into()),
        };
        let json = serde_json::to_string(&credentials).expect("serialize");
        std::fs::write(&creds_path, &json).expect("write");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&creds_path, std::fs::Permissions::from_mode(0o600))
                .expect("chmod");
        }

        let loaded: Credentials =
            serde_json::from_str(&std::fs::read_to_string(&creds_path).expect("read"))
                .expect("parse");
        assert_eq!(loaded, credentials);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&creds_path)
                .expect("metadata")
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(mode, 0o600, "credentials file should be 0600");
        }

        std::fs::remove_file(&creds_path).expect("delete");
        assert!(!creds_path.exists());
    }

    #[test]
    fn garbage_file_content_is_ignored() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let creds_path = tmp.path().join("credentials");

        std::fs::write(&creds_path, "not json at all").expect("write");
        let parsed = std::fs::read_to_string(&creds_path)
            .ok()
            .and_then(|json| serde_json::from_str::<Credentials>(&json).ok());
        assert!(parsed.is_none(), "garbage content should not parse");
    }
}
