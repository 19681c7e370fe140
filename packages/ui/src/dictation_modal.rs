//! Modal that records a dictation clip and hands the finished file back
//! to the caller.

use dioxus::prelude::*;

use crate::recorder::{DictationRecorder, RecorderError, RecorderState};

const DICTATION_CSS: Asset = asset!("/assets/styling/dictation.css");

#[cfg(all(not(target_arch = "wasm32"), feature = "microphone"))]
type PlatformBackend = crate::capture::CaptureBackend;
#[cfg(any(target_arch = "wasm32", not(feature = "microphone")))]
type PlatformBackend = crate::recorder::StubRecorder;

fn platform_recorder() -> DictationRecorder<PlatformBackend> {
    #[cfg(all(not(target_arch = "wasm32"), feature = "microphone"))]
    let backend = PlatformBackend::in_data_dir();
    #[cfg(any(target_arch = "wasm32", not(feature = "microphone")))]
    let backend = PlatformBackend::granting();
    DictationRecorder::new(backend)
}

/// Records a clip and closes with its uri, or with `None` when the user
/// cancels or recording fails. Recording starts as soon as the modal
/// opens; dismissing it mid-recording discards the partial clip.
#[component]
pub fn DictationModal(on_close: EventHandler<Option<String>>) -> Element {
    let mut recorder = use_signal(platform_recorder);
    let mut error = use_signal(|| Option::<String>::None);

    use_effect(move || {
        if let Err(e) = recorder.write().start() {
            error.set(Some(match e {
                RecorderError::PermissionDenied => {
                    "Microphone access was denied. Enable it in your system settings and try again."
                        .to_string()
                }
                RecorderError::Capture(message) => message,
            }));
        }
    });

    // Covers every dismissal path, including unmounts that skip the
    // cancel button. A no-op once the recorder is back at idle.
    use_drop(move || {
        recorder.write().abort();
    });

    let cancel = move |_| {
        recorder.write().abort();
        on_close.call(None);
    };

    let stop = move |_| {
        match recorder.write().stop() {
            Some(uri) => on_close.call(Some(uri)),
            None => error.set(Some("The recording could not be saved.".to_string())),
        }
    };

    let state = recorder.read().state();

    rsx! {
        document::Stylesheet { href: DICTATION_CSS }

        div {
            class: "modal-overlay",
            onclick: cancel,
            div {
                class: "modal-card dictation-card",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                h2 { "Dictation" }

                if let Some(message) = error() {
                    p { class: "dictation-error", "{message}" }
                    div { class: "dictation-controls",
                        button { class: "btn", onclick: cancel, "Close" }
                    }
                } else {
                    div { class: "dictation-status",
                        span {
                            class: if state == RecorderState::Paused { "record-dot paused" } else { "record-dot" },
                        }
                        if state == RecorderState::Paused {
                            span { "Paused" }
                        } else {
                            span { "Recording…" }
                        }
                    }
                    div { class: "dictation-controls",
                        if state == RecorderState::Recording {
                            button {
                                class: "btn",
                                onclick: move |_| recorder.write().pause(),
                                "Pause"
                            }
                        } else {
                            button {
                                class: "btn",
                                onclick: move |_| recorder.write().resume(),
                                "Resume"
                            }
                        }
                        button { class: "btn btn-primary", onclick: stop, "Stop" }
                        button { class: "btn", onclick: cancel, "Cancel" }
                    }
                }
            }
        }
    }
}
