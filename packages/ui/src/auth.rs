//! Authentication context and hooks for the UI.

use backend::{Client, RetryState};
use dioxus::prelude::*;

use crate::session::{AuthStatus, SessionBootstrapper};

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub status: AuthStatus,
    /// Set while the bootstrap waits out an automatic retry, so the
    /// loading screen can say so.
    pub retrying: Option<RetryState>,
}

/// Get the current authentication state.
/// Returns a signal that updates when the session changes.
pub fn use_auth() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

/// Handle for the bootstrap failure screen's "Try again" control.
#[derive(Clone, Copy)]
pub struct BootstrapRetry(Signal<u32>);

impl BootstrapRetry {
    /// Rerun the session bootstrap from scratch.
    pub fn retry(mut self) {
        let next = self.0.peek().wrapping_add(1);
        self.0.set(next);
    }
}

pub fn use_bootstrap_retry() -> BootstrapRetry {
    use_context::<BootstrapRetry>()
}

/// Provider component that resolves the session at startup and tracks
/// every later auth change. Wrap the app in this, below the component
/// that provides the [`Client`] context.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let client = use_context::<Client>();
    let mut state = use_signal(SessionState::default);
    let retry_tick: Signal<u32> = use_signal(|| 0);

    // One task owns the whole session lifecycle: subscribe, bootstrap,
    // then pump the change stream. Unmounting drops the future, which
    // releases the subscription and cancels any pending retry delay.
    // Bumping `retry_tick` restarts it for a manual retry.
    let _ = use_resource(move || {
        let client = client.clone();
        async move {
            let _ = retry_tick();
            state.set(SessionState::default());

            let auth = client.auth().clone();
            // Subscribe before the initial read; the replayed first value
            // closes the gap between the two.
            let mut changes = auth.subscribe();

            let bootstrapper = SessionBootstrapper::new(auth);
            let status = bootstrapper
                .initialize(move |retry_state, _delay| {
                    state.set(SessionState {
                        status: AuthStatus::Loading,
                        retrying: Some(retry_state),
                    });
                })
                .await;

            if let AuthStatus::Failed(kind) = &status {
                client
                    .error_log()
                    .record("session_bootstrap", kind, kind.user_message());
            }
            state.set(SessionState {
                status,
                retrying: None,
            });

            while let Some(change) = changes.next().await {
                if let Some(next) = AuthStatus::from_change(&change) {
                    if state.peek().status != next {
                        state.set(SessionState {
                            status: next,
                            retrying: None,
                        });
                    }
                }
            }
        }
    });

    use_context_provider(|| state);
    use_context_provider(|| BootstrapRetry(retry_tick));

    rsx! {
        {children}
    }
}

/// Button to sign out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let client = use_context::<Client>();

    let onclick = move |_| {
        let client = client.clone();
        async move {
            if let Err(e) = client.auth().sign_out().await {
                // Local state is already cleared; only the remote revoke failed.
                tracing::warn!("remote sign-out failed: {e}");
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
