//! Headless controller for the sign-in / sign-up form.
//!
//! The screens own an [`AuthForm`] in a signal and drive it in three
//! steps: [`AuthForm::begin_submit`] (single-flight gate + validation),
//! [`submit`] (the network call with its one automatic retry), and
//! [`AuthForm::apply_outcome`] (flags cleared, message set). Splitting it
//! this way keeps every rule testable without a renderer.

use backend::{retry, RetryPolicy};

use crate::api::AuthApi;
use crate::validation::{validate_email, validate_password};

/// Which submission the form performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

/// Per-field validation messages, shown next to their inputs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl FieldErrors {
    pub fn any(&self) -> bool {
        self.email.is_some() || self.password.is_some()
    }
}

/// Text for the form's message area.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMessage {
    Info(String),
    Error(String),
}

/// Validated credentials handed to [`submit`].
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// How a submission ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    SignedIn,
    /// Account created but the backend wants email confirmation first.
    ConfirmationPending,
    Failed(backend::ErrorKind),
}

/// State behind the auth screens.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub errors: FieldErrors,
    pub message: Option<FormMessage>,
    /// A submission is in flight; further submits are ignored.
    pub is_submitting: bool,
    /// The in-flight submission is waiting out its automatic retry.
    pub is_retrying: bool,
}

impl AuthForm {
    /// Editing a field clears its error, like the field never being
    /// validated yet.
    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        self.errors.email = None;
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
        self.errors.password = None;
    }

    /// Validate both fields for `mode`, recording per-field messages.
    pub fn validate(&mut self, mode: AuthMode) -> bool {
        self.errors.email = validate_email(self.email.trim()).err();
        self.errors.password = validate_password(&self.password, mode == AuthMode::SignUp).err();
        !self.errors.any()
    }

    /// Gate a submission: rejected while one is already in flight, and
    /// rejected (with field errors set) when validation fails. Neither
    /// rejection touches the network. On success the form is marked
    /// submitting and the credentials to send are returned.
    pub fn begin_submit(&mut self, mode: AuthMode) -> Option<Credentials> {
        if self.is_submitting {
            return None;
        }
        if !self.validate(mode) {
            return None;
        }
        self.message = None;
        self.is_submitting = true;
        Some(Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }

    /// Record the outcome of a submission. Always clears the submitting
    /// and retrying flags, whatever the outcome.
    pub fn apply_outcome(&mut self, outcome: &SubmitOutcome) {
        self.is_submitting = false;
        self.is_retrying = false;
        self.message = match outcome {
            SubmitOutcome::SignedIn => None,
            SubmitOutcome::ConfirmationPending => Some(FormMessage::Info(
                "Check your email to confirm your account, then sign in.".to_string(),
            )),
            SubmitOutcome::Failed(kind) => {
                Some(FormMessage::Error(kind.user_message().to_string()))
            }
        };
    }
}

/// Perform one credential submission with the shared retry policy: at
/// most one automatic retry, and only for network-classified failures.
/// `on_retrying` sees `true` when the retry wait starts and is always
/// left at `false` when the outcome is returned.
pub async fn submit<A: AuthApi>(
    auth: &A,
    mode: AuthMode,
    credentials: &Credentials,
    policy: RetryPolicy,
    mut on_retrying: impl FnMut(bool),
) -> SubmitOutcome {
    let outcome = match mode {
        AuthMode::SignIn => {
            let result = retry(
                policy,
                || auth.sign_in_with_password(&credentials.email, &credentials.password),
                |_, _| on_retrying(true),
            )
            .await;
            match result {
                Ok(_) => SubmitOutcome::SignedIn,
                Err(err) => SubmitOutcome::Failed(err.kind),
            }
        }
        AuthMode::SignUp => {
            let result = retry(
                policy,
                || auth.sign_up(&credentials.email, &credentials.password),
                |_, _| on_retrying(true),
            )
            .await;
            match result {
                Ok(created) if created.needs_confirmation() => SubmitOutcome::ConfirmationPending,
                Ok(_) => SubmitOutcome::SignedIn,
                Err(err) => SubmitOutcome::Failed(err.kind),
            }
        }
    };
    on_retrying(false);
    outcome
}
