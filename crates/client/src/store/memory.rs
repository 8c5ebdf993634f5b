//! In-process [`NoteStore`].
//!
//! Mirrors the API's semantics (unique codes, owner listing order, upsert and
//! compare-and-swap saves, idempotent delete) without a server. The API's
//! request body cap is not modelled. Used for offline runs and as the
//! store behind the editor and view tests. An optional per-call latency lets
//! tests interleave slow writes on a paused clock.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use codenote_core::note_code::{NoteCode, MAX_CODE_ATTEMPTS};
use codenote_core::owner::OwnerId;
use codenote_core::types::{DbId, Timestamp};

use crate::error::ClientError;
use crate::model::{Note, NoteSummary, SaveRequest};
use crate::store::NoteStore;

/// Status reported while the store is switched offline.
const OFFLINE_STATUS: u16 = 503;

#[derive(Default)]
struct MemoryState {
    notes: BTreeMap<NoteCode, Note>,
    next_id: DbId,
    last_timestamp: Option<Timestamp>,
}

impl MemoryState {
    /// Strictly increasing timestamps, so every write is distinguishable.
    fn tick(&mut self) -> Timestamp {
        let now = Utc::now();
        let next = match self.last_timestamp {
            Some(last) if now <= last => last + chrono::Duration::microseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(next);
        next
    }

    fn insert(
        &mut self,
        code: NoteCode,
        title: String,
        content: String,
        user_id: Option<String>,
    ) -> Note {
        self.next_id += 1;
        let now = self.tick();
        let note = Note {
            id: self.next_id,
            code: code.clone(),
            title,
            content,
            user_id,
            created_at: now,
            updated_at: now,
        };
        self.notes.insert(code, note.clone());
        note
    }
}

/// A note store held entirely in memory.
#[derive(Default)]
pub struct MemoryNoteStore {
    state: Mutex<MemoryState>,
    offline: AtomicBool,
    saves: AtomicUsize,
    latency_micros: AtomicU64,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a note under a chosen code, replacing any existing one.
    pub async fn seed(
        &self,
        code: &NoteCode,
        title: &str,
        content: &str,
        owner: Option<&OwnerId>,
    ) -> Note {
        let mut state = self.state.lock().await;
        state.insert(
            code.clone(),
            title.to_string(),
            content.to_string(),
            owner.map(|o| o.to_string()),
        )
    }

    /// Current stored copy of a note, bypassing the offline switch.
    pub async fn stored(&self, code: &NoteCode) -> Option<Note> {
        self.state.lock().await.notes.get(code).cloned()
    }

    /// Number of save calls that reached the store, successful or not.
    pub fn save_calls(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail as if the backend were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Delay applied at the start of every subsequent call. The delay is read
    /// when a call begins, so changing it does not affect calls in flight.
    pub fn set_latency(&self, latency: Duration) {
        let micros = u64::try_from(latency.as_micros()).unwrap_or(u64::MAX);
        self.latency_micros.store(micros, Ordering::SeqCst);
    }

    async fn simulate_latency(&self) {
        let micros = self.latency_micros.load(Ordering::SeqCst);
        if micros > 0 {
            tokio::time::sleep(Duration::from_micros(micros)).await;
        }
    }

    fn check_online(&self) -> Result<(), ClientError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ClientError::Api {
                status: OFFLINE_STATUS,
                body: "note store is offline".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn fetch_note(&self, code: &NoteCode) -> Result<Note, ClientError> {
        self.simulate_latency().await;
        self.check_online()?;
        self.state
            .lock()
            .await
            .notes
            .get(code)
            .cloned()
            .ok_or_else(|| ClientError::NotFound {
                code: code.to_string(),
            })
    }

    async fn note_exists(&self, code: &NoteCode) -> Result<bool, ClientError> {
        self.simulate_latency().await;
        self.check_online()?;
        Ok(self.state.lock().await.notes.contains_key(code))
    }

    async fn list_owned(&self, owner: &OwnerId) -> Result<Vec<NoteSummary>, ClientError> {
        self.simulate_latency().await;
        self.check_online()?;
        let state = self.state.lock().await;
        let mut notes: Vec<&Note> = state
            .notes
            .values()
            .filter(|n| n.user_id.as_deref() == Some(owner.as_str()))
            .collect();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(notes.into_iter().map(NoteSummary::from).collect())
    }

    async fn create_note(&self, owner: &OwnerId) -> Result<Note, ClientError> {
        self.simulate_latency().await;
        self.check_online()?;
        let mut state = self.state.lock().await;
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = NoteCode::generate(&mut rand::rng());
            if state.notes.contains_key(&code) {
                tracing::debug!(code = %code, "Note code already taken, trying another");
                continue;
            }
            return Ok(state.insert(code, String::new(), String::new(), Some(owner.to_string())));
        }
        Err(ClientError::Conflict(
            "Could not allocate a free note code, please try again".to_string(),
        ))
    }

    async fn save_note(
        &self,
        code: &NoteCode,
        request: &SaveRequest,
    ) -> Result<Note, ClientError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        self.check_online()?;

        let mut state = self.state.lock().await;
        let now = state.tick();
        if let Some(note) = state.notes.get_mut(code) {
            if let Some(expected) = request.expected_updated_at {
                if note.updated_at != expected {
                    return Err(ClientError::Conflict(format!(
                        "Note {code} was modified since {expected}"
                    )));
                }
            }
            note.title = request.title.clone();
            note.content = request.content.clone();
            note.updated_at = now;
            return Ok(note.clone());
        }

        if request.expected_updated_at.is_some() {
            return Err(ClientError::NotFound {
                code: code.to_string(),
            });
        }
        Ok(state.insert(
            code.clone(),
            request.title.clone(),
            request.content.clone(),
            request.user_id.as_ref().map(|o| o.to_string()),
        ))
    }

    async fn delete_note(&self, code: &NoteCode) -> Result<(), ClientError> {
        self.simulate_latency().await;
        self.check_online()?;
        self.state.lock().await.notes.remove(code);
        Ok(())
    }
}
