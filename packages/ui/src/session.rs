//! Session bootstrap: the app's top-level authentication state.

use std::time::Duration;

use backend::{retry, AuthChange, AuthEvent, ErrorKind, RetryPolicy, RetryState, User};

use crate::api::AuthApi;

/// Where the app stands with authentication. Exactly one of these is
/// true at any time; every screen branches on it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthStatus {
    /// Bootstrap still running (first attempt or an automatic retry).
    #[default]
    Loading,
    Unauthenticated,
    Authenticated(User),
    /// Bootstrap gave up. Terminal until the user retries manually.
    Failed(ErrorKind),
}

impl AuthStatus {
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthStatus::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// The status a change-stream notification maps to, or `None` for the
    /// informational `InitialSession`, which never overwrites anything.
    /// All other notifications apply unconditionally.
    pub fn from_change(change: &AuthChange) -> Option<AuthStatus> {
        match (change.event, &change.session) {
            (AuthEvent::InitialSession, _) => None,
            (AuthEvent::SignedOut, _) => Some(AuthStatus::Unauthenticated),
            (_, Some(session)) => Some(AuthStatus::Authenticated(session.user.clone())),
            (_, None) => Some(AuthStatus::Unauthenticated),
        }
    }
}

/// Resolves the persisted session into an [`AuthStatus`] at startup,
/// retrying transient failures on the bootstrap ladder (2s / 4s / 6s)
/// before giving up.
pub struct SessionBootstrapper<A: AuthApi> {
    auth: A,
    policy: RetryPolicy,
}

impl<A: AuthApi> SessionBootstrapper<A> {
    pub fn new(auth: A) -> Self {
        Self::with_policy(auth, RetryPolicy::bootstrap())
    }

    pub fn with_policy(auth: A, policy: RetryPolicy) -> Self {
        Self { auth, policy }
    }

    /// Resolve the session once. `on_wait` fires before each automatic
    /// retry delay so the shell can show progress. Dropping the future
    /// cancels any pending delay.
    pub async fn initialize<W>(&self, on_wait: W) -> AuthStatus
    where
        W: FnMut(RetryState, Duration),
    {
        match retry(self.policy, || self.auth.get_session(), on_wait).await {
            Ok(Some(session)) => AuthStatus::Authenticated(session.user),
            Ok(None) => AuthStatus::Unauthenticated,
            Err(err) => {
                tracing::error!("session bootstrap failed: {err}");
                AuthStatus::Failed(err.kind)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{network_error, session_fixture, FakeAuth};
    use backend::{Error, Session};

    fn fast_bootstrapper(auth: FakeAuth) -> SessionBootstrapper<FakeAuth> {
        SessionBootstrapper::with_policy(auth, RetryPolicy::new(3, Duration::from_millis(1)))
    }

    #[tokio::test]
    async fn test_restored_session_authenticates() {
        let auth = FakeAuth::new();
        auth.push_session(Ok(Some(session_fixture("u1"))));

        let status = fast_bootstrapper(auth).initialize(|_, _| {}).await;
        match status {
            AuthStatus::Authenticated(user) => assert_eq!(user.id, "u1"),
            other => panic!("expected authenticated, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_session_is_unauthenticated_not_failed() {
        let auth = FakeAuth::new();
        auth.push_session(Ok(None));

        let status = fast_bootstrapper(auth).initialize(|_, _| {}).await;
        assert_eq!(status, AuthStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_transient_failures_retry_then_succeed() {
        let auth = FakeAuth::new();
        auth.push_session(Err(network_error()))
            .push_session(Err(network_error()))
            .push_session(Ok(Some(session_fixture("u1"))));

        let mut waits = Vec::new();
        let bootstrapper = fast_bootstrapper(auth);
        let status = bootstrapper
            .initialize(|state, delay| waits.push((state.attempt_count, delay)))
            .await;

        assert!(matches!(status, AuthStatus::Authenticated(_)));
        assert_eq!(bootstrapper.auth.session_calls.get(), 3);
        assert_eq!(waits.len(), 2);
        assert_eq!(waits[0].0, 1);
        assert_eq!(waits[1].0, 2);
        // Escalating delays: base, then double.
        assert_eq!(waits[0].1 * 2, waits[1].1);
    }

    #[tokio::test]
    async fn test_exhausted_budget_fails_terminally() {
        let auth = FakeAuth::new();
        for _ in 0..4 {
            auth.push_session(Err(network_error()));
        }

        let bootstrapper = fast_bootstrapper(auth);
        let status = bootstrapper.initialize(|_, _| {}).await;

        assert_eq!(status, AuthStatus::Failed(ErrorKind::Network));
        // 1 attempt + 3 automatic retries, then stop.
        assert_eq!(bootstrapper.auth.session_calls.get(), 4);
    }

    #[tokio::test]
    async fn test_non_transient_failure_skips_retries() {
        let auth = FakeAuth::new();
        auth.push_session(Err(Error::new(ErrorKind::Unknown, "boom")));

        let bootstrapper = fast_bootstrapper(auth);
        let status = bootstrapper.initialize(|_, _| {}).await;

        assert_eq!(status, AuthStatus::Failed(ErrorKind::Unknown));
        assert_eq!(bootstrapper.auth.session_calls.get(), 1);
    }

    #[test]
    fn test_change_mapping() {
        let session: Session = session_fixture("u2");

        // Informational only.
        assert_eq!(
            AuthStatus::from_change(&AuthChange::new(
                AuthEvent::InitialSession,
                Some(session.clone())
            )),
            None
        );
        assert_eq!(
            AuthStatus::from_change(&AuthChange::new(AuthEvent::InitialSession, None)),
            None
        );

        assert_eq!(
            AuthStatus::from_change(&AuthChange::new(AuthEvent::SignedIn, Some(session.clone()))),
            Some(AuthStatus::Authenticated(session.user.clone()))
        );
        assert_eq!(
            AuthStatus::from_change(&AuthChange::new(
                AuthEvent::TokenRefreshed,
                Some(session.clone())
            )),
            Some(AuthStatus::Authenticated(session.user.clone()))
        );
        assert_eq!(
            AuthStatus::from_change(&AuthChange::new(AuthEvent::SignedOut, None)),
            Some(AuthStatus::Unauthenticated)
        );
    }
}
