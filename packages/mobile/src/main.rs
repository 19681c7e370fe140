use backend::{Client, Config};
use dioxus::prelude::*;

use ui::{AuthProvider, AuthStatus};
use views::{BootFailure, BootScreen, Home, Login};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/home")]
    Home {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let client = use_hook(|| Client::connect(Config::from_env()).map_err(|e| e.to_string()));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        match client {
            Ok(client) => rsx! {
                Shell { client }
            },
            Err(message) => rsx! {
                div { class: "boot-screen",
                    h1 { "Noteless" }
                    p { class: "boot-error", "The app is misconfigured: {message}" }
                }
            },
        }
    }
}

#[component]
fn Shell(client: Client) -> Element {
    use_context_provider(|| client.clone());

    rsx! {
        AuthProvider {
            BootGate {
                Router::<Route> {}
            }
        }
    }
}

#[component]
fn BootGate(children: Element) -> Element {
    let session = ui::use_auth();
    let state = session.read().clone();

    match state.status {
        AuthStatus::Loading => rsx! {
            BootScreen { retrying: state.retrying }
        },
        AuthStatus::Failed(kind) => rsx! {
            BootFailure { kind }
        },
        _ => rsx! {
            {children}
        },
    }
}

/// Redirect `/` to `/home`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Home {});
    rsx! {}
}
