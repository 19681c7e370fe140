//! Credential screen for the handheld shells.

use backend::{Client, RetryPolicy};
use dioxus::prelude::*;
use ui::auth_form::{self, AuthForm, AuthMode, FormMessage};
use ui::use_auth;

use crate::Route;

#[component]
pub fn Login() -> Element {
    let client = use_context::<Client>();
    let session = use_auth();
    let nav = use_navigator();

    if session.read().status.user().is_some() {
        nav.replace(Route::Home {});
    }

    let mut form = use_signal(AuthForm::default);
    let mut mode = use_signal(|| AuthMode::SignIn);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let auth = client.auth().clone();
        async move {
            let Some(credentials) = form.write().begin_submit(mode()) else {
                return;
            };
            let outcome = auth_form::submit(
                &auth,
                mode(),
                &credentials,
                RetryPolicy::submit(),
                move |retrying| form.write().is_retrying = retrying,
            )
            .await;
            form.write().apply_outcome(&outcome);
        }
    };

    let toggle = move |_| {
        let next = match mode() {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        };
        mode.set(next);
        form.write().message = None;
    };

    let f = form.read().clone();
    let current = mode();
    let (title, action, switch_label) = match current {
        AuthMode::SignIn => ("Welcome back", "Sign in", "New here? Create an account"),
        AuthMode::SignUp => (
            "Create your account",
            "Create account",
            "Already registered? Sign in",
        ),
    };

    rsx! {
        div { class: "auth-page",
            form { class: "auth-form", onsubmit: on_submit,
                h1 { "{title}" }

                label { class: "auth-field",
                    span { "Email" }
                    input {
                        r#type: "email",
                        value: "{f.email}",
                        autocomplete: "email",
                        oninput: move |evt| form.write().set_email(evt.value()),
                    }
                    if let Some(error) = f.errors.email {
                        span { class: "field-error", "{error}" }
                    }
                }

                label { class: "auth-field",
                    span { "Password" }
                    input {
                        r#type: "password",
                        value: "{f.password}",
                        autocomplete: if current == AuthMode::SignUp { "new-password" } else { "current-password" },
                        oninput: move |evt| form.write().set_password(evt.value()),
                    }
                    if let Some(error) = f.errors.password {
                        span { class: "field-error", "{error}" }
                    }
                }

                match &f.message {
                    Some(FormMessage::Error(text)) => rsx! {
                        p { class: "form-message error", "{text}" }
                    },
                    Some(FormMessage::Info(text)) => rsx! {
                        p { class: "form-message info", "{text}" }
                    },
                    None => rsx! {},
                }

                button {
                    r#type: "submit",
                    class: "btn btn-primary auth-submit",
                    disabled: f.is_submitting,
                    if f.is_retrying {
                        "Connection problem, retrying…"
                    } else if f.is_submitting {
                        "Working…"
                    } else {
                        "{action}"
                    }
                }

                button {
                    r#type: "button",
                    class: "auth-switch",
                    onclick: toggle,
                    "{switch_label}"
                }
            }
        }
    }
}
