//! Startup screens shown while the session bootstrap runs or after it
//! gives up.

use backend::{Client, ErrorKind, RetryState};
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

/// Terminal bootstrap failure with a manual retry, plus the recent
/// entries of the persistent error log for support conversations.
#[component]
pub fn BootFailure(kind: ErrorKind) -> Element {
    let client = use_context::<Client>();
    let retry = use_bootstrap_retry();
    let entries = use_hook(|| client.error_log().entries());

    rsx! {
        div { class: "boot-screen",
            h1 { "Noteless" }
            p { class: "boot-error", "{kind.user_message()}" }
            button {
                class: "btn btn-primary",
                onclick: move |_| retry.retry(),
                "Try again"
            }

            if !entries.is_empty() {
                details { class: "boot-log",
                    summary { "Recent errors" }
                    ul {
                        for entry in entries.iter().rev().take(5) {
                            li { key: "{entry.timestamp}",
                                "{entry.timestamp} {entry.context}: {entry.message}"
                            }
                        }
                    }
                }
            }
        }
    }
}
