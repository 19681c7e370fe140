//! Signed-in home: sidebar, entry editor, dictation capture.

use dioxus::prelude::*;
use ui::{use_auth, DictationModal, EditorView, Sidebar};

use crate::Route;

#[component]
pub fn Home() -> Element {
    let session = use_auth();
    let nav = use_navigator();

    if session.read().status.user().is_none() {
        nav.replace(Route::Login {});
    }

    let mut show_dictation = use_signal(|| false);
    let mut clips = use_signal(Vec::<String>::new);

    rsx! {
        div { class: "home-layout",
            Sidebar { on_dictate: move |_| show_dictation.set(true) }
            EditorView { clips: clips() }

            if show_dictation() {
                DictationModal {
                    on_close: move |clip: Option<String>| {
                        if let Some(uri) = clip {
                            clips.write().push(uri);
                        }
                        show_dictation.set(false);
                    },
                }
            }
        }
    }
}
