//! App sidebar with the signed-in identity and the primary actions.

use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};

const SIDEBAR_CSS: Asset = asset!("/assets/styling/sidebar.css");

#[component]
pub fn Sidebar(on_dictate: EventHandler<()>) -> Element {
    let auth = use_auth();
    let who = auth
        .read()
        .status
        .user()
        .map(|user| user.display_name().to_string())
        .unwrap_or_default();

    rsx! {
        document::Stylesheet { href: SIDEBAR_CSS }

        aside {
            class: "sidebar",

            div { class: "sidebar-brand", "Noteless" }

            nav {
                class: "sidebar-actions",
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_dictate.call(()),
                    "New dictation"
                }
            }

            div {
                class: "sidebar-footer",
                span { class: "sidebar-identity", title: "{who}", "{who}" }
                LogoutButton { class: "btn btn-quiet" }
            }
        }
    }
}
