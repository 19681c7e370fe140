//! Startup screens shown while the session bootstrap runs or after it
//! gives up.

use backend::{ErrorKind, RetryState};
use dioxus::prelude::*;
use ui::use_bootstrap_retry;

#[component]
pub fn BootScreen(retrying: Option<RetryState>) -> Element {
    rsx! {
        div { class: "boot-screen",
            h1 { "Noteless" }
            if let Some(state) = retrying {
                p { class: "boot-status",
                    "Connection problem. Retrying, attempt {state.attempt_count} of {state.max_attempts}…"
                }
            } else {
                p { class: "boot-status", "Preparing your session…" }
            }
        }
    }
}

#[component]
pub fn BootFailure(kind: ErrorKind) -> Element {
    let retry = use_bootstrap_retry();

    rsx! {
        div { class: "boot-screen",
            h1 { "Noteless" }
            p { class: "boot-error", "{kind.user_message()}" }
            button {
                class: "btn btn-primary",
                onclick: move |_| retry.retry(),
                "Try again"
            }
        }
    }
}
