//! Structured editor for an examination entry.
//!
//! Fields live in local signals only; nothing is persisted until a
//! later save flow picks them up.

use dioxus::prelude::*;

const EDITOR_CSS: Asset = asset!("/assets/styling/editor.css");

#[component]
fn Field(label: String, placeholder: String, mut value: Signal<String>) -> Element {
    rsx! {
        label {
            class: "editor-field",
            span { class: "editor-label", "{label}" }
            textarea {
                class: "editor-input",
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |evt| value.set(evt.value()),
            }
        }
    }
}

#[component]
pub fn EditorView(clips: Vec<String>) -> Element {
    let history = use_signal(String::new);
    let inspection = use_signal(String::new);
    let palpation = use_signal(String::new);
    let mobility = use_signal(String::new);
    let neurology = use_signal(String::new);
    let assessment = use_signal(String::new);
    let plan = use_signal(String::new);

    rsx! {
        document::Stylesheet { href: EDITOR_CSS }

        section {
            class: "editor",
            h1 { class: "editor-title", "New entry" }

            Field {
                label: "History",
                placeholder: "Presenting complaint, onset, course",
                value: history,
            }

            h2 { class: "editor-heading", "Findings" }
            div {
                class: "editor-grid",
                Field { label: "Inspection", placeholder: "Posture, swelling, skin", value: inspection }
                Field { label: "Palpation", placeholder: "Tenderness, tone, temperature", value: palpation }
                Field { label: "Mobility", placeholder: "Range of motion, movement quality", value: mobility }
                Field { label: "Neurology", placeholder: "Sensation, reflexes, strength", value: neurology }
            }

            Field {
                label: "Assessment",
                placeholder: "Working diagnosis",
                value: assessment,
            }
            Field {
                label: "Plan",
                placeholder: "Treatment and follow-up",
                value: plan,
            }

            if !clips.is_empty() {
                h2 { class: "editor-heading", "Dictations" }
                ul {
                    class: "editor-clips",
                    for clip in clips.iter() {
                        li { key: "{clip}", "{clip}" }
                    }
                }
            }
        }
    }
}
