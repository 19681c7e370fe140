//! The note list: model and fetch states.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use backend::ErrorKind;

use crate::api::NotesApi;

/// A note row as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => "Untitled note",
        }
    }

    /// First `max_chars` of the content for the list card, on a char
    /// boundary, with a trailing ellipsis when cut.
    pub fn excerpt(&self, max_chars: usize) -> String {
        let content = self.content.as_deref().unwrap_or_default();
        if content.chars().count() <= max_chars {
            content.to_string()
        } else {
            let cut: String = content.chars().take(max_chars).collect();
            format!("{cut}…")
        }
    }

    /// The most recent of created/updated, for the card footer.
    pub fn last_touched(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

/// What the list screen renders. An empty `Loaded` is the empty state,
/// deliberately distinct from `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub enum NotesState {
    Loading,
    Loaded(Vec<Note>),
    Failed(ErrorKind),
}

impl NotesState {
    pub fn is_empty(&self) -> bool {
        matches!(self, NotesState::Loaded(notes) if notes.is_empty())
    }
}

/// Fetch the user's notes, newest first. Runs on every mount of the list
/// screen; there is no cache between mounts.
pub async fn load_notes<A: NotesApi>(api: &A, user_id: &str) -> NotesState {
    match api.notes_for(user_id).await {
        Ok(notes) => NotesState::Loaded(notes),
        Err(err) => {
            tracing::error!("failed to load notes: {err}");
            NotesState::Failed(err.kind)
        }
    }
}
