//! Transient user-facing notifications ("toasts").
//!
//! [`Notifier`] fans [`Toast`]s out over a `tokio::sync::broadcast` channel.
//! Views publish, and whatever renders toasts subscribes. Clones share the
//! same channel.

use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const NOTE_SAVED: &str = "Note saved successfully!";
pub const SAVE_FAILED: &str = "Failed to save note";
pub const SAVE_CONFLICT: &str = "Note was changed elsewhere; reload to get the latest version";
pub const LOAD_FAILED: &str = "Failed to load note";
pub const CODE_NOT_FOUND: &str = "Note not found with this code";
pub const LOOKUP_FAILED: &str = "Failed to look up note code";
pub const FETCH_FAILED: &str = "Failed to fetch notes.";
pub const CREATE_FAILED: &str = "Failed to create note. Please try again.";
pub const NOTE_DELETED: &str = "Note deleted successfully!";
pub const DELETE_FAILED: &str = "Failed to delete the note.";

// ---------------------------------------------------------------------------
// Toast
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

const DEFAULT_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Toast>,
}

impl Notifier {
    /// Create a notifier buffering up to `capacity` undelivered toasts per
    /// subscriber. Slow subscribers lose the oldest ones.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.sender.subscribe()
    }

    /// Publish a toast. Without subscribers it is dropped.
    pub fn publish(&self, toast: Toast) {
        let _ = self.sender.send(toast);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.publish(Toast {
            kind: ToastKind::Success,
            message: message.into(),
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(Toast {
            kind: ToastKind::Error,
            message: message.into(),
        });
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
