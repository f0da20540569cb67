//! Transport traits consumed by the state stores.
//!
//! The stores depend on these traits rather than on a concrete HTTP client,
//! so tests can drive them with programmable fakes. `vigil-api` provides the
//! production implementation over reqwest.

use async_trait::async_trait;

use crate::errors::ApiError;
use crate::filter::QueryFilter;
use crate::identity::{AuthSession, NewUser, UserProfile};
use crate::responses::{CrimeStatistics, TrendPoint};

/// Authentication operations against the platform API.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange a username and password for a profile plus token pair.
    async fn login(&self, username: &str, password: &str) -> Result<AuthSession, ApiError>;

    /// Create an account and sign it in.
    async fn register(&self, new_user: &NewUser) -> Result<AuthSession, ApiError>;

    /// Invalidate a refresh token server-side.
    async fn logout(&self, refresh: &str) -> Result<(), ApiError>;

    /// Fetch the profile belonging to an access token.
    async fn current_user(&self, access: &str) -> Result<UserProfile, ApiError>;
}

/// Analytics operations against the platform API.
#[async_trait]
pub trait CrimeApi: Send + Sync {
    /// Aggregate statistics for the given filter.
    async fn statistics(&self, filter: &QueryFilter) -> Result<CrimeStatistics, ApiError>;

    /// Monthly trend series for the given filter.
    async fn trends(&self, filter: &QueryFilter) -> Result<Vec<TrendPoint>, ApiError>;
}
