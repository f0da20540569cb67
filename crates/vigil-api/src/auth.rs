//! Authentication and account endpoints.

use async_trait::async_trait;
use serde_json::json;

use vigil_core::errors::ApiError;
use vigil_core::identity::{AuthSession, NewUser, UserProfile};
use vigil_core::transport::AuthApi;

use crate::ApiClient;

impl ApiClient {
    /// Exchange a username and password for a profile plus token pair.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` on rejected credentials; the server does not
    /// distinguish a wrong username from a wrong password.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession, ApiError> {
        self.post_json(
            "/auth/login/",
            &json!({
                "username": username,
                "password": password,
            }),
        )
        .await
    }

    /// Create an account. The platform signs the new account in and answers
    /// with the same shape as login.
    ///
    /// # Errors
    ///
    /// `ApiError::Server` carries the field-level validation detail on 400.
    pub async fn register(&self, new_user: &NewUser) -> Result<AuthSession, ApiError> {
        self.post_json(
            "/auth/register/",
            &json!({
                "username": new_user.username,
                "email": new_user.email,
                "password": new_user.password,
                "confirm_password": new_user.password,
            }),
        )
        .await
    }

    /// Blacklist a refresh token server-side.
    ///
    /// # Errors
    ///
    /// `ApiError::Server` with status 400 when the token is already invalid.
    pub async fn logout(&self, refresh: &str) -> Result<(), ApiError> {
        self.post_unit("/auth/logout/", &json!({ "refresh": refresh }))
            .await
    }

    /// Fetch the profile belonging to an access token. Takes the token
    /// explicitly so stored credentials can be validated before adoption.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` when the token is expired or revoked.
    pub async fn current_user(&self, access: &str) -> Result<UserProfile, ApiError> {
        self.get_json_as("/auth/me/", access).await
    }

    /// Change the signed-in account's password.
    ///
    /// # Errors
    ///
    /// `ApiError::Server` with status 400 when the old password is wrong.
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        self.post_unit(
            "/auth/change-password/",
            &json!({
                "old_password": old_password,
                "new_password": new_password,
                "confirm_new_password": new_password,
            }),
        )
        .await
    }

    /// Ask the platform to mail a password-reset token.
    ///
    /// # Errors
    ///
    /// Transport and server failures only; the endpoint acknowledges unknown
    /// addresses with 2xx to avoid account enumeration.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        self.post_unit("/auth/password-reset/", &json!({ "email": email }))
            .await
    }

    /// Redeem a mailed reset token for a new password.
    ///
    /// # Errors
    ///
    /// `ApiError::Server` with status 400 on an expired or mismatched token.
    pub async fn confirm_password_reset(
        &self,
        email: &str,
        token: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        self.post_unit(
            "/auth/password-reset/confirm/",
            &json!({
                "email": email,
                "token": token,
                "new_password": new_password,
                "confirm_new_password": new_password,
            }),
        )
        .await
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<AuthSession, ApiError> {
        Self::login(self, username, password).await
    }

    async fn register(&self, new_user: &NewUser) -> Result<AuthSession, ApiError> {
        Self::register(self, new_user).await
    }

    async fn logout(&self, refresh: &str) -> Result<(), ApiError> {
        Self::logout(self, refresh).await
    }

    async fn current_user(&self, access: &str) -> Result<UserProfile, ApiError> {
        Self::current_user(self, access).await
    }
}
