//! Error types for remote calls.
//!
//! Every failure that crosses the SDK boundary is an [`Error`] carrying a
//! classified [`ErrorKind`]. Classification is by substring match on the
//! raw message, so the rest of the app branches on the category and never
//! on message text. Only [`ErrorKind::Network`] is transient; it is the one
//! category retry policies are allowed to act on.

use thiserror::Error;

/// Failure categories for remote calls, in classification order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Sign-in rejected: wrong email or password.
    InvalidCredentials,
    /// Sign-up rejected: the email already has an account.
    AlreadyRegistered,
    /// Sign-up rejected: password does not meet the backend policy.
    WeakPassword,
    /// Transport-level failure: unreachable host, timeout, dropped
    /// connection. The only transient category.
    Network,
    /// Anything the classifier does not recognize.
    Unknown,
}

impl ErrorKind {
    /// Classify a raw error message. Case-insensitive; first match wins.
    pub fn classify(message: &str) -> Self {
        let m = message.to_lowercase();
        if m.contains("invalid login credentials") {
            ErrorKind::InvalidCredentials
        } else if m.contains("already registered") {
            ErrorKind::AlreadyRegistered
        } else if m.contains("password") {
            ErrorKind::WeakPassword
        } else if m.contains("network")
            || m.contains("connection")
            || m.contains("offline")
            || m.contains("failed to fetch")
        {
            ErrorKind::Network
        } else {
            ErrorKind::Unknown
        }
    }

    /// Whether an error of this kind may succeed on a plain retry.
    pub fn is_transient(self) -> bool {
        self == ErrorKind::Network
    }

    /// Fixed user-facing text for this category. Screens render these;
    /// raw messages stay in logs.
    pub fn user_message(self) -> &'static str {
        match self {
            ErrorKind::InvalidCredentials => "Incorrect email or password.",
            ErrorKind::AlreadyRegistered => {
                "An account with this email already exists. Try signing in instead."
            }
            ErrorKind::WeakPassword => "Password must be at least 6 characters.",
            ErrorKind::Network => "Connection problem. Check your network and try again.",
            ErrorKind::Unknown => "Something went wrong. Please try again.",
        }
    }
}

/// An error from the remote backend or the transport underneath it.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Build an error whose kind is classified from the message itself.
    pub fn classified(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: ErrorKind::classify(&message),
            message,
        }
    }

    /// Build an error from a non-success HTTP response body.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        let message = message_from_body(body)
            .unwrap_or_else(|| format!("request failed with status {status}"));
        Self::classified(message)
    }

    pub fn is_transient(&self) -> bool {
        self.kind.is_transient()
    }

    pub fn user_message(&self) -> &'static str {
        self.kind.user_message()
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() || e.is_builder() {
            Error::new(ErrorKind::Unknown, format!("unexpected response: {e}"))
        } else {
            // Timeouts, refused connections, browser fetch failures.
            Error::new(ErrorKind::Network, format!("network request failed: {e}"))
        }
    }
}

/// Pull the human-readable message out of a backend error body. The auth
/// endpoints use `msg` or `error_description`, the data endpoints `message`.
fn message_from_body(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        msg: Option<String>,
        message: Option<String>,
        error_description: Option<String>,
        error: Option<String>,
    }

    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .msg
        .or(parsed.message)
        .or(parsed.error_description)
        .or(parsed.error)
        .filter(|m| !m.is_empty())
}

/// Failure to construct a [`crate::Client`].
#[derive(Debug, Error)]
pub enum InitError {
    #[error("invalid backend url `{0}`")]
    InvalidUrl(String),
    #[error("failed to build http client: {0}")]
    HttpClient(String),
}
