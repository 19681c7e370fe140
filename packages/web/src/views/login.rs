//! Credential sign-in and sign-up page.

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

    // Route guard: the session change stream lands here after sign-in.
    if session.read().status.user().is_some() {
        nav.replace(Route::Notes {});
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

    let f = form.read().clone();
    let current = mode();

    rsx! {
        div { class: "auth-page",
            div { class: "auth-card",
                h1 { class: "auth-brand", "Noteless" }
                p { class: "auth-tagline", "Dictation-first notes for clinicians" }

                div { class: "auth-tabs",
                    button {
                        class: if current == AuthMode::SignIn { "auth-tab active" } else { "auth-tab" },
                        onclick: move |_| {
                            mode.set(AuthMode::SignIn);
                            form.write().message = None;
                        },
                        "Sign in"
                    }
                    button {
                        class: if current == AuthMode::SignUp { "auth-tab active" } else { "auth-tab" },
                        onclick: move |_| {
                            mode.set(AuthMode::SignUp);
                            form.write().message = None;
                        },
                        "Create account"
                    }
                }

                form { class: "auth-form", onsubmit: on_submit,
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
                            if current == AuthMode::SignIn { "Signing in…" } else { "Creating account…" }
                        } else {
                            if current == AuthMode::SignIn { "Sign in" } else { "Create account" }
                        }
                    }
                }
            }
        }
    }
}
