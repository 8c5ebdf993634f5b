//! Code-entry gate: resolves a typed code to the note's route.

use codenote_core::note_code::NoteCode;

use crate::error::ClientError;
use crate::notify::{self, Notifier};
use crate::route::Route;
use crate::store::SharedStore;

pub struct AccessGate {
    store: SharedStore,
    notifier: Notifier,
}

impl AccessGate {
    pub fn new(store: SharedStore, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    /// Resolve user input to [`Route::Note`].
    ///
    /// The code is validated locally first; malformed input is rejected with
    /// [`ClientError::Core`] and never reaches the store. A well-formed code
    /// with no note behind it publishes a "not found" toast and returns
    /// [`ClientError::NotFound`], after which the caller may retry.
    pub async fn resolve(&self, input: &str) -> Result<Route, ClientError> {
        let code = NoteCode::parse(input)?;

        match self.store.note_exists(&code).await {
            Ok(true) => Ok(Route::Note(code)),
            Ok(false) => {
                tracing::info!(code = %code, "No note under entered code");
                self.notifier.error(notify::CODE_NOT_FOUND);
                Err(ClientError::NotFound {
                    code: code.to_string(),
                })
            }
            Err(err) => {
                tracing::error!(code = %code, error = %err, "Error checking note code");
                self.notifier.error(notify::LOOKUP_FAILED);
                Err(err)
            }
        }
    }
}
