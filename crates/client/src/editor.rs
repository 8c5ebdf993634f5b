//! Edit-buffer and autosave controller for a single note.
//!
//! A [`NoteEditor`] owns the [`EditBuffer`] for one code and a [`Debouncer`]
//! that persists the buffer once edits have been quiet for the autosave
//! delay. Saves write title and content in full; the watermarks in the buffer
//! track what the store last acknowledged.
//!
//! Concurrent saves are not serialized. Each completion moves the watermarks
//! to the values it wrote, so the last save to complete wins locally, just as
//! the last write to land wins in the store under
//! [`ConflictPolicy::LastWriteWins`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use codenote_core::conflict::ConflictPolicy;
use codenote_core::note_code::NoteCode;
use codenote_core::owner::OwnerId;
use codenote_core::types::Timestamp;

use crate::buffer::{EditBuffer, Field};
use crate::debounce::{Debouncer, DEFAULT_DEBOUNCE_DELAY};
use crate::error::ClientError;
use crate::model::{Note, SaveRequest};
use crate::notify::{self, Notifier};
use crate::route::Route;
use crate::store::SharedStore;

/// Per-editor settings.
#[derive(Debug, Clone)]
pub struct EditorOptions {
    pub autosave_delay: Duration,
    pub conflict_policy: ConflictPolicy,
    /// Owner recorded if a save ends up creating the note.
    pub owner: Option<OwnerId>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            autosave_delay: DEFAULT_DEBOUNCE_DELAY,
            conflict_policy: ConflictPolicy::default(),
            owner: None,
        }
    }
}

/// Result of a save request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The buffer was written; carries the stored note.
    Saved(Note),
    /// The buffer matched the watermarks, nothing was written.
    Unchanged,
}

struct EditorState {
    buffer: EditBuffer,
    debouncer: Debouncer,
    saves_in_flight: usize,
}

struct EditorShared {
    code: NoteCode,
    store: SharedStore,
    notifier: Notifier,
    owner: Option<OwnerId>,
    policy: ConflictPolicy,
    state: Mutex<EditorState>,
}

/// Counts one save in flight until dropped, including when the save future
/// is dropped before the store answers.
struct InFlightSave<'a> {
    shared: &'a EditorShared,
}

impl<'a> InFlightSave<'a> {
    fn begin(shared: &'a EditorShared, state: &mut EditorState) -> Self {
        state.saves_in_flight += 1;
        Self { shared }
    }
}

impl Drop for InFlightSave<'_> {
    fn drop(&mut self) {
        self.shared.lock().saves_in_flight -= 1;
    }
}

impl EditorShared {
    fn lock(&self) -> MutexGuard<'_, EditorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write the buffer if it differs from the watermarks.
    async fn persist(&self) -> Result<SaveOutcome, ClientError> {
        let (request, in_flight) = {
            let mut state = self.lock();
            if !state.buffer.is_dirty() {
                return Ok(SaveOutcome::Unchanged);
            }
            let in_flight = InFlightSave::begin(self, &mut state);
            let request = SaveRequest {
                title: state.buffer.title.clone(),
                content: state.buffer.content.clone(),
                user_id: self.owner.clone(),
                expected_updated_at: match self.policy {
                    ConflictPolicy::LastWriteWins => None,
                    ConflictPolicy::RejectStale => state.buffer.remote_updated_at,
                },
            };
            (request, in_flight)
        };

        let result = self.store.save_note(&self.code, &request).await;

        if let Ok(ref note) = result {
            self.lock()
                .buffer
                .mark_persisted(request.title, request.content, note.updated_at);
        }
        drop(in_flight);

        match result {
            Ok(note) => {
                tracing::debug!(code = %self.code, updated_at = %note.updated_at, "Note saved");
                self.notifier.success(notify::NOTE_SAVED);
                Ok(SaveOutcome::Saved(note))
            }
            Err(err) => {
                tracing::error!(code = %self.code, error = %err, "Error saving note");
                if matches!(err, ClientError::Conflict(_)) {
                    self.notifier.error(notify::SAVE_CONFLICT);
                } else {
                    self.notifier.error(notify::SAVE_FAILED);
                }
                Err(err)
            }
        }
    }
}

/// Editor for the note under one code.
///
/// Dropping the editor cancels a pending autosave. Saves already running are
/// never aborted.
pub struct NoteEditor {
    shared: Arc<EditorShared>,
}

impl NoteEditor {
    pub fn new(
        code: NoteCode,
        store: SharedStore,
        notifier: Notifier,
        options: EditorOptions,
    ) -> Self {
        Self {
            shared: Arc::new(EditorShared {
                code,
                store,
                notifier,
                owner: options.owner,
                policy: options.conflict_policy,
                state: Mutex::new(EditorState {
                    buffer: EditBuffer::default(),
                    debouncer: Debouncer::new(options.autosave_delay),
                    saves_in_flight: 0,
                }),
            }),
        }
    }

    /// Create an editor and load its note.
    pub async fn open(
        code: NoteCode,
        store: SharedStore,
        notifier: Notifier,
        options: EditorOptions,
    ) -> Result<Self, ClientError> {
        let editor = Self::new(code, store, notifier, options);
        editor.load().await?;
        Ok(editor)
    }

    /// Fetch the note and replace the buffer and watermarks with it.
    ///
    /// On failure the buffer is left as it was and a toast is published.
    pub async fn load(&self) -> Result<Note, ClientError> {
        let shared = &self.shared;
        match shared.store.fetch_note(&shared.code).await {
            Ok(note) => {
                shared
                    .lock()
                    .buffer
                    .loaded(note.title.clone(), note.content.clone(), note.updated_at);
                tracing::debug!(code = %shared.code, "Note loaded");
                Ok(note)
            }
            Err(err) => {
                tracing::error!(code = %shared.code, error = %err, "Error fetching note");
                shared.notifier.error(notify::LOAD_FAILED);
                Err(err)
            }
        }
    }

    /// Change one field locally and re-arm the autosave timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn edit(&self, field: Field, value: impl Into<String>) {
        let weak = Arc::downgrade(&self.shared);
        let mut state = self.shared.lock();
        state.buffer.set(field, value.into());
        state.debouncer.schedule(move || async move {
            if let Some(shared) = weak.upgrade() {
                // Failures are already logged and toasted.
                let _ = shared.persist().await;
            }
        });
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.edit(Field::Title, title);
    }

    pub fn set_content(&self, content: impl Into<String>) {
        self.edit(Field::Content, content);
    }

    /// Save now. Cancels the pending autosave, whose diff this save covers.
    pub async fn manual_save(&self) -> Result<SaveOutcome, ClientError> {
        self.shared.lock().debouncer.cancel();
        self.shared.persist().await
    }

    /// Copy of the current buffer and watermarks.
    pub fn snapshot(&self) -> EditBuffer {
        self.shared.lock().buffer.clone()
    }

    pub fn title(&self) -> String {
        self.shared.lock().buffer.title.clone()
    }

    pub fn content(&self) -> String {
        self.shared.lock().buffer.content.clone()
    }

    pub fn is_dirty(&self) -> bool {
        self.shared.lock().buffer.is_dirty()
    }

    /// Whether any save is in flight.
    pub fn is_saving(&self) -> bool {
        self.shared.lock().saves_in_flight > 0
    }

    pub fn last_saved(&self) -> Option<Timestamp> {
        self.shared.lock().buffer.last_saved
    }

    pub fn autosave_pending(&self) -> bool {
        self.shared.lock().debouncer.is_pending()
    }

    pub fn code(&self) -> &NoteCode {
        &self.shared.code
    }

    /// Link handed out alongside the code: the access page of `base_url`.
    pub fn share_link(&self, base_url: &str) -> String {
        Route::Access.url(base_url)
    }

    pub fn share_message(&self) -> String {
        format!(
            "Code copied: {}. Share this code with others to collaborate!",
            self.shared.code
        )
    }
}
