//! The session store: owns authentication state and drives the auth API.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use vigil_core::errors::ApiError;
use vigil_core::identity::{AuthSession, NewUser};
use vigil_core::transport::AuthApi;

use crate::expiry;
use crate::state::{SessionState, SessionStatus};
use crate::token_store;

/// Tokens this close to expiry are treated as already expired, so a restore
/// does not adopt a session that dies moments later.
const EXPIRY_BUFFER_SECS: i64 = 60;

/// Single-owner authentication state machine.
///
/// All methods take `&self`; interior state lives behind a `Mutex` that is
/// never held across an await point. Each authentication attempt gets a
/// ticket from a monotonic counter, and a response is only applied when its
/// ticket is still the newest, so a slow first login cannot clobber the
/// session a second login already established.
pub struct SessionStore<A> {
    api: A,
    state: Mutex<SessionState>,
    attempt: AtomicU64,
}

impl<A: AuthApi> SessionStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(SessionState::default()),
            attempt: AtomicU64::new(0),
        }
    }

    /// Current state, cloned.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn begin_attempt(&self) -> u64 {
        let attempt = self.attempt.fetch_add(1, Ordering::SeqCst) + 1;
        let mut state = self.lock();
        state.status = SessionStatus::Authenticating;
        state.last_error = None;
        attempt
    }

    fn finish_attempt(
        &self,
        attempt: u64,
        result: Result<AuthSession, ApiError>,
        remember: bool,
    ) -> SessionState {
        if self.attempt.load(Ordering::SeqCst) != attempt {
            tracing::debug!(attempt, "stale authentication response dropped");
            return self.snapshot();
        }
        match result {
            Ok(session) => {
                if remember && let Err(error) = token_store::store(&session.credentials) {
                    tracing::warn!(
                        %error,
                        "credential persistence failed; session remains in-memory"
                    );
                }
                let mut state = self.lock();
                if self.attempt.load(Ordering::SeqCst) != attempt {
                    return state.clone();
                }
                state.status = SessionStatus::Authenticated;
                state.current_user = Some(session.user);
                state.credentials = Some(session.credentials);
                state.last_error = None;
                state.clone()
            }
            Err(error) => {
                let mut state = self.lock();
                if self.attempt.load(Ordering::SeqCst) != attempt {
                    return state.clone();
                }
                state.status = SessionStatus::Failed;
                state.current_user = None;
                state.credentials = None;
                state.last_error = Some(error.to_string());
                state.clone()
            }
        }
    }

    /// Sign in. On success the session becomes authenticated and, when
    /// `remember` is set, the token pair is persisted for later restores.
    pub async fn login(&self, username: &str, password: &str, remember: bool) -> SessionState {
        let attempt = self.begin_attempt();
        let result = self.api.login(username, password).await;
        self.finish_attempt(attempt, result, remember)
    }

    /// Create an account and adopt the session it answers with.
    pub async fn register(&self, new_user: &NewUser, remember: bool) -> SessionState {
        let attempt = self.begin_attempt();
        let result = self.api.register(new_user).await;
        self.finish_attempt(attempt, result, remember)
    }

    /// Sign out. Best-effort server-side refresh-token revocation, then the
    /// local session and stored credentials are cleared unconditionally.
    /// Idempotent: signing out while signed out is a no-op.
    pub async fn logout(&self) -> SessionState {
        // Invalidate any in-flight authentication attempt.
        self.attempt.fetch_add(1, Ordering::SeqCst);

        let refresh = self
            .lock()
            .credentials
            .as_ref()
            .and_then(|credentials| credentials.refresh.clone());
        if let Some(refresh) = refresh
            && let Err(error) = self.api.logout(&refresh).await
        {
            tracing::warn!(%error, "server-side logout failed; clearing local session anyway");
        }

        if let Err(error) = token_store::delete() {
            tracing::warn!(%error, "failed to remove stored credentials");
        }

        let mut state = self.lock();
        *state = SessionState::default();
        state.clone()
    }

    /// Adopt a previously persisted session, if any.
    ///
    /// Tokens that decode to an expired JWT are discarded without a network
    /// round-trip. Everything else is validated against the server; rejected
    /// credentials are removed and the store stays signed out.
    pub async fn restore(&self) -> SessionState {
        let Some(credentials) = token_store::load() else {
            return self.snapshot();
        };

        match expiry::decode_expiry(&credentials.access) {
            Ok(expires_at)
                if expires_at
                    <= chrono::Utc::now() + chrono::Duration::seconds(EXPIRY_BUFFER_SECS) =>
            {
                tracing::info!(%expires_at, "stored access token expired; discarding");
                if let Err(error) = token_store::delete() {
                    tracing::warn!(%error, "failed to remove expired credentials");
                }
                return self.snapshot();
            }
            Ok(_) => {}
            Err(error) => {
                tracing::debug!(%error, "stored token is not a decodable JWT; validating remotely");
            }
        }

        let attempt = self.begin_attempt();
        match self.api.current_user(&credentials.access).await {
            Ok(user) => {
                self.finish_attempt(attempt, Ok(AuthSession { user, credentials }), false)
            }
            Err(error) => {
                tracing::warn!(%error, "stored credentials failed validation; signing out");
                if let Err(error) = token_store::delete() {
                    tracing::warn!(%error, "failed to remove rejected credentials");
                }
                let mut state = self.lock();
                if self.attempt.load(Ordering::SeqCst) != attempt {
                    return state.clone();
                }
                *state = SessionState::default();
                state.clone()
            }
        }
    }

    /// Re-fetch the signed-in profile. A failure keeps the session and
    /// surfaces the error on the snapshot instead of signing out.
    pub async fn refresh_user(&self) -> SessionState {
        let access = self
            .lock()
            .credentials
            .as_ref()
            .map(|credentials| credentials.access.clone());
        let Some(access) = access else {
            return self.snapshot();
        };

        match self.api.current_user(&access).await {
            Ok(user) => {
                let mut state = self.lock();
                if state.is_authenticated() {
                    state.current_user = Some(user);
                    state.last_error = None;
                }
                state.clone()
            }
            Err(error) => {
                tracing::warn!(%error, "profile refresh failed; keeping current session");
                let mut state = self.lock();
                state.last_error = Some(error.to_string());
                state.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use tokio::sync::oneshot;

    use vigil_core::errors::ApiError;
    use vigil_core::identity::{AuthSession, Credentials, NewUser, UserProfile};
    use vigil_core::transport::AuthApi;

    use super::SessionStore;
    use crate::state::SessionStatus;

    fn profile(username: &str) -> UserProfile {
        UserProfile {
            id: 7,
            username: username.into(),
            email: None,
            first_name: None,
            last_name: None,
            organization: None,
            is_agency_user: false,
        }
    }

    fn session(username: &str) -> AuthSession {
        AuthSession {
            user: profile(username),
            credentials: Credentials {
                access: format!("{username}-access"),
                refresh: Some(format!("{username}-refresh")),
            },
        }
    }

    type GatedLogin = (
        Option<oneshot::Receiver<()>>,
        Result<AuthSession, ApiError>,
    );

    #[derive(Default)]
    struct FakeAuthApi {
        login_results: Mutex<VecDeque<GatedLogin>>,
        register_results: Mutex<VecDeque<Result<AuthSession, ApiError>>>,
        me_results: Mutex<VecDeque<Result<UserProfile, ApiError>>>,
        logout_calls: Mutex<Vec<String>>,
    }

    impl FakeAuthApi {
        fn push_login(&self, result: Result<AuthSession, ApiError>) {
            self.login_results.lock().unwrap().push_back((None, result));
        }

        fn push_gated_login(&self, result: Result<AuthSession, ApiError>) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.login_results
                .lock()
                .unwrap()
                .push_back((Some(rx), result));
            tx
        }
    }

    #[async_trait]
    impl AuthApi for FakeAuthApi {
        async fn login(&self, _username: &str, _password: &str) -> Result<AuthSession, ApiError> {
            let (gate, result) = self
                .login_results
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected login call");
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            result
        }

        async fn register(&self, _new_user: &NewUser) -> Result<AuthSession, ApiError> {
            self.register_results
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected register call")
        }

        async fn logout(&self, refresh: &str) -> Result<(), ApiError> {
            self.logout_calls.lock().unwrap().push(refresh.to_owned());
            Ok(())
        }

        async fn current_user(&self, _access: &str) -> Result<UserProfile, ApiError> {
            self.me_results
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected current_user call")
        }
    }

    #[tokio::test]
    async fn login_success_sets_authenticated_state() {
        let api = FakeAuthApi::default();
        api.push_login(Ok(session("jdoe")));
        let store = SessionStore::new(api);

        let state = store.login("jdoe", "hunter2", false).await;
        assert_eq!(state.status, SessionStatus::Authenticated);
        assert_eq!(state.current_user, Some(profile("jdoe")));
        assert_eq!(
            state.credentials.as_ref().map(|c| c.access.as_str()),
            Some("jdoe-access")
        );
        assert_eq!(state.last_error, None);
    }

    #[tokio::test]
    async fn login_failure_sets_failed_state_with_error() {
        let api = FakeAuthApi::default();
        api.push_login(Err(ApiError::Unauthorized));
        let store = SessionStore::new(api);

        let state = store.login("jdoe", "wrong", false).await;
        assert_eq!(state.status, SessionStatus::Failed);
        assert_eq!(state.current_user, None);
        assert_eq!(state.credentials, None);
        assert!(state.last_error.is_some());
    }

    #[tokio::test]
    async fn failed_login_then_retry_recovers() {
        let api = FakeAuthApi::default();
        api.push_login(Err(ApiError::Network("connection refused".into())));
        api.push_login(Ok(session("jdoe")));
        let store = SessionStore::new(api);

        let failed = store.login("jdoe", "hunter2", false).await;
        assert_eq!(failed.status, SessionStatus::Failed);

        let recovered = store.login("jdoe", "hunter2", false).await;
        assert_eq!(recovered.status, SessionStatus::Authenticated);
        assert_eq!(recovered.last_error, None);
    }

    #[tokio::test]
    async fn register_success_adopts_session() {
        let api = FakeAuthApi::default();
        api.register_results
            .lock()
            .unwrap()
            .push_back(Ok(session("newbie")));
        let store = SessionStore::new(api);

        let new_user = NewUser {
            username: "newbie".into(),
            email: "newbie@example.org".into(),
            password: "hunter2".into(),
        };
        let state = store.register(&new_user, false).await;
        assert_eq!(state.status, SessionStatus::Authenticated);
        assert_eq!(state.current_user, Some(profile("newbie")));
    }

    #[tokio::test]
    async fn stale_login_response_is_dropped() {
        let api = FakeAuthApi::default();
        let release_first = api.push_gated_login(Ok(session("first")));
        api.push_login(Ok(session("second")));
        let store = Arc::new(SessionStore::new(api));

        let slow = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.login("first", "pw", false).await }
        });
        // Let the slow login reach its gate before racing it.
        tokio::task::yield_now().await;

        let fast = store.login("second", "pw", false).await;
        assert_eq!(fast.current_user, Some(profile("second")));

        release_first.send(()).expect("gate receiver alive");
        let slow_view = slow.await.expect("task join");

        // The first login resolved last but must not clobber the newer session.
        assert_eq!(slow_view.current_user, Some(profile("second")));
        assert_eq!(
            store.snapshot().current_user,
            Some(profile("second"))
        );
    }

    #[tokio::test]
    async fn refresh_user_updates_profile_in_place() {
        let api = FakeAuthApi::default();
        api.push_login(Ok(session("jdoe")));
        let updated = UserProfile {
            first_name: Some("Jane".into()),
            ..profile("jdoe")
        };
        api.me_results.lock().unwrap().push_back(Ok(updated.clone()));
        let store = SessionStore::new(api);

        store.login("jdoe", "hunter2", false).await;
        let state = store.refresh_user().await;
        assert_eq!(state.status, SessionStatus::Authenticated);
        assert_eq!(state.current_user, Some(updated));
    }

    #[tokio::test]
    async fn refresh_user_failure_keeps_session() {
        let api = FakeAuthApi::default();
        api.push_login(Ok(session("jdoe")));
        api.me_results
            .lock()
            .unwrap()
            .push_back(Err(ApiError::Network("timed out".into())));
        let store = SessionStore::new(api);

        store.login("jdoe", "hunter2", false).await;
        let state = store.refresh_user().await;
        assert_eq!(state.status, SessionStatus::Authenticated);
        assert_eq!(state.current_user, Some(profile("jdoe")));
        assert!(state.last_error.is_some());
    }

    #[tokio::test]
    async fn refresh_user_without_session_is_a_noop() {
        let store = SessionStore::new(FakeAuthApi::default());
        let state = store.refresh_user().await;
        assert_eq!(state.status, SessionStatus::Idle);
    }
}
