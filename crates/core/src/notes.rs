//! Note listing helpers.
//!
//! Title and content are free text of any length; the API's request body
//! cap is the only size limit.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// How many characters of content stand in for a missing title in listings.
pub const PREVIEW_LENGTH: usize = 50;

/// Listing label for a note with neither title nor content.
pub const EMPTY_NOTE_LABEL: &str = "No content";

/// Label shown for a note in listings: the title, else the start of the
/// content, else [`EMPTY_NOTE_LABEL`].
pub fn preview_label(title: &str, content: &str) -> String {
    if !title.is_empty() {
        title.to_string()
    } else if !content.is_empty() {
        content.chars().take(PREVIEW_LENGTH).collect()
    } else {
        EMPTY_NOTE_LABEL.to_string()
    }
}
