//! The signed-in notes list.

use backend::Client;
use dioxus::prelude::*;
use ui::{load_notes, use_auth, LogoutButton, Note, NotesState};

use crate::Route;

#[component]
pub fn Notes() -> Element {
    let client = use_context::<Client>();
    let session = use_auth();
    let nav = use_navigator();

    let user_id = session.read().status.user().map(|user| user.id.clone());
    if user_id.is_none() {
        nav.replace(Route::Login {});
    }

    // Refetches on every mount; returning to this screen always shows
    // fresh data.
    let mut notes = use_resource(move || {
        let api = client.clone();
        let user_id = user_id.clone();
        async move {
            match user_id {
                Some(id) => load_notes(&api, &id).await,
                None => NotesState::Loading,
            }
        }
    });

    let body = match &*notes.read() {
        Some(NotesState::Loaded(list)) if list.is_empty() => rsx! {
            div { class: "notes-status",
                p { "No notes yet." }
                p { class: "notes-hint", "Notes you dictate on your phone will show up here." }
            }
        },
        Some(NotesState::Loaded(list)) => {
            let list = list.clone();
            rsx! {
                div { class: "notes-grid",
                    for note in list {
                        NoteCard { key: "{note.id}", note }
                    }
                }
            }
        }
        Some(NotesState::Failed(kind)) => rsx! {
            div { class: "notes-status",
                p { class: "notes-error", "{kind.user_message()}" }
                button { class: "btn", onclick: move |_| notes.restart(), "Retry" }
            }
        },
        Some(NotesState::Loading) | None => rsx! {
            p { class: "notes-status", "Loading notes…" }
        },
    };

    rsx! {
        div { class: "notes-page",
            header { class: "notes-header",
                h1 { "Your notes" }
                LogoutButton { class: "btn btn-quiet" }
            }
            {body}
        }
    }
}

#[component]
fn NoteCard(note: Note) -> Element {
    let when = note.last_touched().format("%b %e, %Y").to_string();
    let excerpt = note.excerpt(140);

    rsx! {
        article { class: "note-card",
            h2 { class: "note-title", "{note.display_title()}" }
            if !excerpt.is_empty() {
                p { class: "note-excerpt", "{excerpt}" }
            }
            span { class: "note-date", "{when}" }
        }
    }
}
