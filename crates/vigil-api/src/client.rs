//! HTTP client core: construction, bearer state, and error mapping.

use std::time::Duration;

use serde::de::DeserializeOwned;
use vigil_config::ApiConfig;
use vigil_core::errors::ApiError;

/// Typed client for the platform API.
///
/// Cloning is cheap (`reqwest::Client` is reference-counted internally), so
/// callers derive an authenticated client with [`Self::with_bearer`] without
/// touching the original.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    bearer: Option<String>,
}

impl ApiClient {
    /// Build a client from the API configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] when the underlying HTTP client cannot
    /// be constructed (TLS backend initialization, for example).
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(format!("client construction: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            bearer: None,
        })
    }

    /// Derive a client that sends `Authorization: Bearer <token>` on every
    /// request.
    #[must_use]
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// Derive a client with no authorization header.
    #[must_use]
    pub fn without_bearer(mut self) -> Self {
        self.bearer = None;
        self
    }

    /// Whether the client currently carries a bearer token.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.bearer.is_some()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    /// POST a JSON body and decode a JSON response.
    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self.send(self.authorize(self.http.post(self.url(path)).json(body))).await?;
        Self::decode(path, response).await
    }

    /// POST a JSON body, discarding the response body.
    pub(crate) async fn post_unit<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: serde::Serialize + Sync,
    {
        self.send(self.authorize(self.http.post(self.url(path)).json(body)))
            .await?;
        Ok(())
    }

    /// GET with query parameters and decode a JSON response.
    pub(crate) async fn get_json<T>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .send(self.authorize(self.http.get(self.url(path)).query(query)))
            .await?;
        Self::decode(path, response).await
    }

    /// GET with an explicit bearer token, bypassing the stored one. Used for
    /// credential validation before a token is adopted.
    pub(crate) async fn get_json_as<T>(&self, path: &str, access: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let request = self
            .http
            .get(self.url(path))
            .header("Authorization", format!("Bearer {access}"));
        let response = self.send(request).await?;
        Self::decode(path, response).await
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Server {
                status: status.as_u16(),
                detail: extract_detail(&body),
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("{path}: {e}")))
    }
}

/// Pull the human-readable message out of an error body.
///
/// The platform answers errors as JSON objects carrying `detail`, `message`,
/// or `error`; anything else falls back to the raw body.
fn extract_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message", "error"] {
            if let Some(text) = value.get(key).and_then(serde_json::Value::as_str) {
                return text.to_owned();
            }
        }
        return value.to_string();
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no error detail provided".to_owned()
    } else {
        trimmed.to_owned()
    }
}
