//! Note model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use codenote_core::types::{DbId, Timestamp};

/// Name of the unique constraint on `notes.code`.
pub const NOTE_CODE_CONSTRAINT: &str = "uq_notes_code";

/// A row from the `notes` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Note {
    pub id: DbId,
    pub code: String,
    pub title: String,
    pub content: String,
    pub user_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// List projection of a note, as shown in an owner's note list.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct NoteSummary {
    pub code: String,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new, empty note owned by `user_id`.
#[derive(Debug, Deserialize)]
pub struct CreateNote {
    pub user_id: String,
}

/// DTO for saving a note. Title and content are always written in full.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveNote {
    pub title: String,
    pub content: String,
    /// Owner recorded if the save inserts a new row; ignored on update.
    pub user_id: Option<String>,
    /// When present the save only succeeds if the stored note still has
    /// this `updated_at`.
    pub expected_updated_at: Option<Timestamp>,
}
