//! The owner's note list.

use codenote_core::note_code::NoteCode;
use codenote_core::owner::OwnerId;

use crate::error::ClientError;
use crate::model::NoteSummary;
use crate::notify::{self, Notifier};
use crate::route::Route;
use crate::store::SharedStore;

/// List view over the notes tagged with the local owner id.
///
/// The list holds whatever the last successful [`refresh`](Self::refresh)
/// returned; a failed refresh keeps the previous list.
pub struct HomeView {
    store: SharedStore,
    owner: OwnerId,
    notifier: Notifier,
    notes: Vec<NoteSummary>,
    creating: bool,
}

impl HomeView {
    pub fn new(store: SharedStore, owner: OwnerId, notifier: Notifier) -> Self {
        Self {
            store,
            owner,
            notifier,
            notes: Vec::new(),
            creating: false,
        }
    }

    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Notes from the last refresh, most recently modified first.
    pub fn notes(&self) -> &[NoteSummary] {
        &self.notes
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    /// Reload the owner's notes.
    pub async fn refresh(&mut self) -> Result<&[NoteSummary], ClientError> {
        match self.store.list_owned(&self.owner).await {
            Ok(notes) => {
                tracing::debug!(count = notes.len(), "Fetched owned notes");
                self.notes = notes;
                Ok(&self.notes)
            }
            Err(err) => {
                tracing::error!(error = %err, "Error fetching notes");
                self.notifier.error(notify::FETCH_FAILED);
                Err(err)
            }
        }
    }

    /// Create an empty note for the owner and return the route to open it.
    pub async fn create_note(&mut self) -> Result<Route, ClientError> {
        self.creating = true;
        let result = self.store.create_note(&self.owner).await;
        self.creating = false;

        match result {
            Ok(note) => {
                tracing::info!(code = %note.code, "Note created");
                // The new note already exists; a failed refresh only leaves
                // the list stale.
                let _ = self.refresh().await;
                Ok(Route::Note(note.code))
            }
            Err(err) => {
                tracing::error!(error = %err, "Error creating note");
                self.notifier.error(notify::CREATE_FAILED);
                Err(err)
            }
        }
    }

    /// Delete a note by code, then refresh the list.
    pub async fn delete_note(&mut self, code: &NoteCode) -> Result<(), ClientError> {
        match self.store.delete_note(code).await {
            Ok(()) => {
                tracing::info!(code = %code, "Note deleted");
                self.notifier.success(notify::NOTE_DELETED);
                let _ = self.refresh().await;
                Ok(())
            }
            Err(err) => {
                tracing::error!(code = %code, error = %err, "Error deleting note");
                self.notifier.error(notify::DELETE_FAILED);
                Err(err)
            }
        }
    }
}
