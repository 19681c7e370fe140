//! Session and credential operations.
//!
//! [`Auth`] talks to the token/signup/logout endpoints, caches the session
//! through a [`KvStore`], and publishes every state change on a watch
//! channel. Persisting and notifying happen together under one lock, so
//! observers never see storage and the change stream disagree.

use std::sync::{Arc, Mutex};

use serde::Deserialize;
use tokio::sync::watch;

use crate::config::Config;
use crate::error::Error;
use crate::session::{AuthChange, AuthEvent, Session, User};
use crate::storage::KvStore;
use crate::subscription::Subscription;

/// Storage key for the cached session.
pub const SESSION_KEY: &str = "noteless_session";

/// Refresh the access token this many seconds before it actually expires.
const REFRESH_MARGIN_SECS: i64 = 60;

/// Result of a sign-up call. `session` is `None` when the backend requires
/// email confirmation before issuing tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUpResult {
    pub user: User,
    pub session: Option<Session>,
}

impl SignUpResult {
    /// Whether the account still needs email confirmation.
    pub fn needs_confirmation(&self) -> bool {
        self.session.is_none()
    }
}

/// The signup endpoint answers with a full session when auto-confirm is
/// on, and with a bare user when confirmation is pending.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(Session),
    User(User),
}

/// Auth operations of a connected [`crate::Client`].
#[derive(Clone)]
pub struct Auth {
    http: reqwest::Client,
    config: Config,
    store: Arc<dyn KvStore>,
    session: Arc<Mutex<Option<Session>>>,
    changes: Arc<watch::Sender<AuthChange>>,
}

impl Auth {
    /// Restore any persisted session and seed the change stream with the
    /// `InitialSession` notification carrying it.
    pub(crate) fn new(http: reqwest::Client, config: Config, store: Arc<dyn KvStore>) -> Self {
        let restored: Option<Session> = store
            .get(SESSION_KEY)
            .and_then(|json| serde_json::from_str(&json).ok());
        let (changes, _) = watch::channel(AuthChange::new(
            AuthEvent::InitialSession,
            restored.clone(),
        ));
        Self {
            http,
            config,
            store,
            session: Arc::new(Mutex::new(restored)),
            changes: Arc::new(changes),
        }
    }

    /// The session held right now, without touching the network.
    pub fn current_session(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }

    /// The current session, refreshed first if it is about to expire.
    ///
    /// `Ok(None)` means signed out. A refresh rejected by the backend
    /// (revoked or reused token) also lands there, after clearing local
    /// state; only transport failures propagate as errors so callers can
    /// retry them.
    pub async fn get_session(&self) -> Result<Option<Session>, Error> {
        let Some(session) = self.current_session() else {
            return Ok(None);
        };
        if !session.expires_within(REFRESH_MARGIN_SECS) {
            return Ok(Some(session));
        }

        match self.refresh(&session.refresh_token).await {
            Ok(refreshed) => Ok(Some(refreshed)),
            Err(err) if err.is_transient() => Err(err),
            Err(err) => {
                tracing::warn!("session refresh rejected, signing out: {err}");
                self.persist_and_emit(AuthEvent::SignedOut, None);
                Ok(None)
            }
        }
    }

    /// Fetch the user record for the current session from the backend.
    /// `Ok(None)` when no session is held.
    pub async fn get_user(&self) -> Result<Option<User>, Error> {
        let Some(session) = self.current_session() else {
            return Ok(None);
        };
        let response = self
            .http
            .get(self.config.auth_endpoint("user"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        let user: User = Self::parse(response).await?;
        Ok(Some(user))
    }

    /// Exchange email + password for a session. Persists it and emits
    /// `SignedIn` on success.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, Error> {
        let response = self
            .http
            .post(self.config.auth_endpoint("token?grant_type=password"))
            .header("apikey", &self.config.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        let session: Session = Self::parse(response).await?;
        let session = session.normalized();
        self.persist_and_emit(AuthEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }

    /// Create an account. When the backend issues tokens right away the
    /// session is persisted and `SignedIn` emitted; when it only returns
    /// the user (confirmation pending) nothing changes locally.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpResult, Error> {
        let response = self
            .http
            .post(self.config.auth_endpoint("signup"))
            .header("apikey", &self.config.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        let parsed: SignUpResponse = Self::parse(response).await?;
        Ok(match parsed {
            SignUpResponse::Session(session) => {
                let session = session.normalized();
                self.persist_and_emit(AuthEvent::SignedIn, Some(session.clone()));
                SignUpResult {
                    user: session.user.clone(),
                    session: Some(session),
                }
            }
            SignUpResponse::User(user) => SignUpResult {
                user,
                session: None,
            },
        })
    }

    /// Sign out. Local state is cleared and `SignedOut` emitted first;
    /// the remote token revocation is attempted afterwards and its
    /// failure reported without undoing the local sign-out.
    pub async fn sign_out(&self) -> Result<(), Error> {
        let session = self.current_session();
        self.persist_and_emit(AuthEvent::SignedOut, None);

        let Some(session) = session else {
            return Ok(());
        };
        let response = self
            .http
            .post(self.config.auth_endpoint("logout"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::from_response(status, &body));
        }
        Ok(())
    }

    /// Subscribe to auth changes. The first `next()` replays the current
    /// state, so subscribing and reading compose without a gap.
    pub fn subscribe(&self) -> Subscription {
        Subscription::new(self.changes.subscribe())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, Error> {
        let response = self
            .http
            .post(self.config.auth_endpoint("token?grant_type=refresh_token"))
            .header("apikey", &self.config.anon_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await?;
        let session: Session = Self::parse(response).await?;
        let session = session.normalized();
        self.persist_and_emit(AuthEvent::TokenRefreshed, Some(session.clone()));
        Ok(session)
    }

    /// Store and publish a new auth state as one step.
    fn persist_and_emit(&self, event: AuthEvent, session: Option<Session>) {
        let mut slot = self.session.lock().unwrap();
        match &session {
            Some(s) => {
                if let Ok(json) = serde_json::to_string(s) {
                    self.store.set(SESSION_KEY, &json);
                }
            }
            None => self.store.remove(SESSION_KEY),
        }
        *slot = session.clone();
        self.changes.send_replace(AuthChange::new(event, session));
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::from_response(status.as_u16(), &body));
        }
        Ok(response.json::<T>().await?)
    }
}
