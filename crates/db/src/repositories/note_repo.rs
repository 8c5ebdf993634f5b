//! Repository for the `notes` table.

use sqlx::PgPool;

use codenote_core::note_code::NoteCode;
use codenote_core::types::Timestamp;

use crate::is_unique_violation;
use crate::models::note::{Note, NoteSummary, SaveNote, NOTE_CODE_CONSTRAINT};

/// Column list for notes queries.
const COLUMNS: &str = "id, code, title, content, user_id, created_at, updated_at";

/// Column list for the owner listing.
const SUMMARY_COLUMNS: &str = "code, title, content, created_at, updated_at";

/// Next `updated_at` for a row being overwritten. Strictly increasing per row
/// so that compare-and-swap on `updated_at` never sees two writes as one.
const NEXT_UPDATED_AT: &str = "GREATEST(NOW(), notes.updated_at + INTERVAL '1 microsecond')";

/// Provides CRUD operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert an empty note under `code`, returning the created row.
    ///
    /// Fails with a unique violation on [`NOTE_CODE_CONSTRAINT`] if the code
    /// is taken.
    pub async fn create(
        pool: &PgPool,
        code: &NoteCode,
        user_id: Option<&str>,
    ) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (code, title, content, user_id)
             VALUES ($1, '', '', $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(code.as_str())
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Try each candidate code in turn until one inserts without colliding.
    ///
    /// Returns `Ok(None)` when every candidate was already taken. Errors
    /// other than a code collision abort immediately.
    pub async fn create_with_codes<I>(
        pool: &PgPool,
        candidates: I,
        user_id: Option<&str>,
    ) -> Result<Option<Note>, sqlx::Error>
    where
        I: IntoIterator<Item = NoteCode>,
    {
        for code in candidates {
            match Self::create(pool, &code, user_id).await {
                Ok(note) => return Ok(Some(note)),
                Err(e) if is_unique_violation(&e, NOTE_CODE_CONSTRAINT) => {
                    tracing::debug!(code = %code, "Note code already taken, trying another");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }

    /// Find a note by its access code.
    pub async fn find_by_code(pool: &PgPool, code: &NoteCode) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE code = $1");
        sqlx::query_as::<_, Note>(&query)
            .bind(code.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Whether a note with this code exists.
    pub async fn exists(pool: &PgPool, code: &NoteCode) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM notes WHERE code = $1)")
            .bind(code.as_str())
            .fetch_one(pool)
            .await
    }

    /// List every note tagged with `user_id`, most recently modified first.
    ///
    /// Unpaginated: an owner is expected to hold a handful of notes.
    pub async fn list_by_owner(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<NoteSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM notes
             WHERE user_id = $1
             ORDER BY updated_at DESC, id DESC"
        );
        sqlx::query_as::<_, NoteSummary>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Write title and content in full: overwrite the note if the code
    /// exists, insert it otherwise. The owner is only set on insert.
    pub async fn upsert(
        pool: &PgPool,
        code: &NoteCode,
        input: &SaveNote,
    ) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (code, title, content, user_id)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (code) DO UPDATE SET
                title = EXCLUDED.title,
                content = EXCLUDED.content,
                updated_at = {NEXT_UPDATED_AT}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(code.as_str())
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.user_id)
            .fetch_one(pool)
            .await
    }

    /// Overwrite title and content only if the note's `updated_at` still
    /// equals `expected_updated_at`.
    ///
    /// Returns `None` when the note is missing or has been written since.
    pub async fn update_if_unchanged(
        pool: &PgPool,
        code: &NoteCode,
        input: &SaveNote,
        expected_updated_at: Timestamp,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "UPDATE notes SET
                title = $2,
                content = $3,
                updated_at = {NEXT_UPDATED_AT}
             WHERE code = $1 AND updated_at = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(code.as_str())
            .bind(&input.title)
            .bind(&input.content)
            .bind(expected_updated_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete a note by code. Returns `true` if a row was removed.
    pub async fn delete_by_code(pool: &PgPool, code: &NoteCode) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE code = $1")
            .bind(code.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
