//! Local edit buffer with persisted-state watermarks.

use codenote_core::types::Timestamp;

/// Which editable field an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Content,
}

/// The text being edited plus the last values known to be durably stored.
///
/// The buffer is dirty whenever either field differs from its watermark.
/// Watermarks start empty, so a fresh buffer with no edits is clean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    pub title: String,
    pub content: String,
    pub persisted_title: String,
    pub persisted_content: String,
    /// Time of the last successful load or save, for display.
    pub last_saved: Option<Timestamp>,
    /// `updated_at` of the stored row as last observed by this buffer.
    pub remote_updated_at: Option<Timestamp>,
}

impl EditBuffer {
    pub fn is_dirty(&self) -> bool {
        self.title != self.persisted_title || self.content != self.persisted_content
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Title => self.title = value,
            Field::Content => self.content = value,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Content => &self.content,
        }
    }

    /// Replace buffer and watermarks with freshly loaded values.
    pub fn loaded(&mut self, title: String, content: String, updated_at: Timestamp) {
        self.persisted_title = title.clone();
        self.persisted_content = content.clone();
        self.title = title;
        self.content = content;
        self.last_saved = Some(updated_at);
        self.remote_updated_at = Some(updated_at);
    }

    /// Record that `title` and `content` were stored at `updated_at`.
    ///
    /// Only the watermarks move; edits made while the save was in flight stay
    /// in the buffer and keep it dirty.
    pub fn mark_persisted(&mut self, title: String, content: String, updated_at: Timestamp) {
        self.persisted_title = title;
        self.persisted_content = content;
        self.last_saved = Some(updated_at);
        self.remote_updated_at = Some(updated_at);
    }
}
