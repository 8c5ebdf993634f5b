//! The remote note store seam.
//!
//! Views and the editor only talk to a [`NoteStore`]; [`HttpNoteStore`]
//! reaches the API over HTTP and [`MemoryNoteStore`] keeps notes in process.

use std::sync::Arc;

use async_trait::async_trait;

use codenote_core::note_code::NoteCode;
use codenote_core::owner::OwnerId;

use crate::error::ClientError;
use crate::model::{Note, NoteSummary, SaveRequest};

pub mod http;
pub mod memory;

pub use http::HttpNoteStore;
pub use memory::MemoryNoteStore;

/// Equality-keyed access to the `notes` table.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Load a note by code. Missing notes are [`ClientError::NotFound`].
    async fn fetch_note(&self, code: &NoteCode) -> Result<Note, ClientError>;

    /// Whether a note exists under the code.
    async fn note_exists(&self, code: &NoteCode) -> Result<bool, ClientError>;

    /// Notes tagged with `owner`, most recently modified first.
    async fn list_owned(&self, owner: &OwnerId) -> Result<Vec<NoteSummary>, ClientError>;

    /// Create an empty note for `owner` under a store-assigned code.
    async fn create_note(&self, owner: &OwnerId) -> Result<Note, ClientError>;

    /// Write title and content in full, inserting the note if absent.
    async fn save_note(&self, code: &NoteCode, request: &SaveRequest)
        -> Result<Note, ClientError>;

    /// Delete a note by code.
    async fn delete_note(&self, code: &NoteCode) -> Result<(), ClientError>;
}

/// A store shared between views and editors.
pub type SharedStore = Arc<dyn NoteStore>;
