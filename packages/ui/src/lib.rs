//! This crate contains all shared UI for the workspace: the session
//! bootstrap and auth context, the credential form controller, the
//! notes list state, and the dictation recorder with its views.

mod api;
pub use api::{AuthApi, NotesApi};

mod validation;
pub use validation::{validate_email, validate_password, EMAIL_MIN_LENGTH, PASSWORD_MIN_LENGTH};

mod session;
pub use session::{AuthStatus, SessionBootstrapper};

pub mod auth_form;
pub use auth_form::{AuthForm, AuthMode, Credentials, SubmitOutcome};

mod auth;
pub use auth::{
    use_auth, use_bootstrap_retry, AuthProvider, BootstrapRetry, LogoutButton, SessionState,
};

mod notes;
pub use notes::{load_notes, Note, NotesState};

mod recorder;
pub use recorder::{
    DictationRecorder, Permission, RecorderBackend, RecorderError, RecorderState, StubRecorder,
};

// Real capture needs an audio host, so it stays off wasm and behind the
// `microphone` feature. Everything else falls back to the stub backend.
#[cfg(all(not(target_arch = "wasm32"), feature = "microphone"))]
mod capture;
#[cfg(all(not(target_arch = "wasm32"), feature = "microphone"))]
pub use capture::CaptureBackend;

mod sidebar;
pub use sidebar::Sidebar;

mod editor;
pub use editor::EditorView;

mod dictation_modal;
pub use dictation_modal::DictationModal;

#[cfg(test)]
mod testing;
