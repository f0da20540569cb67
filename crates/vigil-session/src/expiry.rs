use base64::Engine as _;

use crate::error::SessionError;

/// Decode a JWT `exp` claim without signature verification.
///
/// This is a best-effort local check used to skip a doomed validation
/// round-trip. The server remains the authority; tokens that do not look
/// like JWTs (the env-var tier accepts opaque tokens) are validated
/// remotely instead.
///
/// # Errors
///
/// Returns [`SessionError::TokenFormat`] if the token is not a three-part
/// JWT, the payload is not base64 JSON, or the `exp` claim is missing.
pub fn decode_expiry(access: &str) -> Result<chrono::DateTime<chrono::Utc>, SessionError> {
    let parts: Vec<&str> = access.split('.').collect();
    if parts.len() != 3 {
        return Err(SessionError::TokenFormat("not a three-part JWT".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| SessionError::TokenFormat(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| SessionError::TokenFormat(format!("JSON parse failed: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| SessionError::TokenFormat("missing exp claim".into()))?;
    chrono::DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| SessionError::TokenFormat("invalid exp timestamp".into()))
}
