//! Session and auth-change wire types.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Client-safe identity of a signed-in user. Ids stay `String` on the
/// client so the same type works in WASM and native builds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    /// Best label we have for the user: email, else the raw id.
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.id)
    }
}

/// An authenticated session as issued by the token endpoint.
///
/// Unknown wire fields are ignored on deserialize; the struct keeps only
/// what the client needs to authenticate requests and refresh itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "bearer")]
    pub token_type: String,
    /// Lifetime in seconds, as sent on the wire.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Absolute expiry as a Unix timestamp. Filled from `expires_in` by
    /// [`Session::normalized`] when the backend omits it.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

fn bearer() -> String {
    "bearer".to_string()
}

impl Session {
    /// Fold a relative `expires_in` into an absolute `expires_at`. Called
    /// once on every session that crosses the wire.
    pub fn normalized(mut self) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = self.expires_in.map(|secs| Utc::now().timestamp() + secs);
        }
        self
    }

    /// Whether the access token expires within `margin_secs` from now.
    /// Sessions without expiry metadata are treated as still valid.
    pub fn expires_within(&self, margin_secs: i64) -> bool {
        match self.expires_at {
            Some(at) => Utc::now().timestamp() + margin_secs >= at,
            None => false,
        }
    }
}

/// What changed in the authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// Emitted once per client, carrying whatever session was restored from
    /// local storage (possibly none). Informational: observers must not
    /// treat it as a completed bootstrap.
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// A single notification on the auth change stream.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthChange {
    pub event: AuthEvent,
    pub session: Option<Session>,
}

impl AuthChange {
    pub fn new(event: AuthEvent, session: Option<Session>) -> Self {
        Self { event, session }
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }
}
