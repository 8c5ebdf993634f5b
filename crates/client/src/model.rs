//! Wire types exchanged with the notes API.

use serde::{Deserialize, Serialize};

use codenote_core::note_code::NoteCode;
use codenote_core::notes::preview_label;
use codenote_core::owner::OwnerId;
use codenote_core::types::{DbId, Timestamp};

/// A stored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: DbId,
    pub code: NoteCode,
    pub title: String,
    pub content: String,
    pub user_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row of the owner's note list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
    pub code: NoteCode,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl NoteSummary {
    /// Label shown in the list: title, else the start of the content.
    pub fn label(&self) -> String {
        preview_label(&self.title, &self.content)
    }
}

impl From<&Note> for NoteSummary {
    fn from(note: &Note) -> Self {
        Self {
            code: note.code.clone(),
            title: note.title.clone(),
            content: note.content.clone(),
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

/// Body of a save. Title and content are always sent in full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveRequest {
    pub title: String,
    pub content: String,
    /// Owner recorded if the save creates the note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<OwnerId>,
    /// Compare-and-swap guard; `None` means last write wins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_updated_at: Option<Timestamp>,
}

/// Body of a create request.
#[derive(Debug, Serialize)]
pub struct CreateRequest<'a> {
    pub user_id: &'a OwnerId,
}

/// `{ "data": T }` response envelope.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Payload of the existence check.
#[derive(Debug, Deserialize)]
pub struct ExistsPayload {
    pub exists: bool,
}

/// `{ "error", "code" }` error body.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}
