//! Handlers for shared notes addressed by 4-digit access codes.
//!
//! Holding a code is the only access check: any caller may load, save or
//! delete a note by code. The `user_id` owner tag only scopes the list view.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use codenote_core::error::CoreError;
use codenote_core::note_code::{NoteCode, MAX_CODE_ATTEMPTS};
use codenote_core::owner::OwnerId;
use codenote_db::models::note::{CreateNote, SaveNote};
use codenote_db::repositories::NoteRepo;

use crate::error::{AppError, AppResult};
use crate::query::OwnerParams;
use crate::response::{DataResponse, ExistsResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate a path segment as a note code before it reaches the database.
fn parse_code(raw: &str) -> AppResult<NoteCode> {
    Ok(NoteCode::parse(raw)?)
}

fn not_found(code: &NoteCode) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Note",
        code: code.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /notes
///
/// Create an empty note owned by `user_id` under a freshly generated code.
/// Taken codes are retried with new random ones.
pub async fn create_note(
    State(state): State<AppState>,
    Json(input): Json<CreateNote>,
) -> AppResult<impl IntoResponse> {
    let owner = OwnerId::parse(&input.user_id)?;

    let candidates =
        std::iter::repeat_with(|| NoteCode::generate(&mut rand::rng())).take(MAX_CODE_ATTEMPTS);

    let note = NoteRepo::create_with_codes(&state.pool, candidates, Some(owner.as_str()))
        .await?
        .ok_or_else(|| {
            tracing::warn!(
                attempts = MAX_CODE_ATTEMPTS,
                "No free note code found while creating a note"
            );
            AppError::Core(CoreError::Conflict(
                "Could not allocate a free note code, please try again".into(),
            ))
        })?;

    tracing::info!(code = %note.code, user_id = %owner, "Note created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: note })))
}

/// GET /notes?user_id=
///
/// List the notes tagged with an owner, most recently modified first.
pub async fn list_notes(
    State(state): State<AppState>,
    Query(params): Query<OwnerParams>,
) -> AppResult<impl IntoResponse> {
    let owner = OwnerId::parse(&params.user_id)?;
    let notes = NoteRepo::list_by_owner(&state.pool, owner.as_str()).await?;
    Ok(Json(DataResponse { data: notes }))
}

/// GET /notes/{code}
pub async fn get_note(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    let code = parse_code(&code)?;
    let note = NoteRepo::find_by_code(&state.pool, &code)
        .await?
        .ok_or_else(|| not_found(&code))?;
    Ok(Json(DataResponse { data: note }))
}

/// GET /notes/{code}/exists
pub async fn note_exists(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    let code = parse_code(&code)?;
    let exists = NoteRepo::exists(&state.pool, &code).await?;
    Ok(Json(DataResponse {
        data: ExistsResponse { exists },
    }))
}

/// PUT /notes/{code}
///
/// Write title and content in full. Without `expected_updated_at` the save
/// is an upsert and the last write wins; with it the save is a
/// compare-and-swap and a stale writer gets 409.
pub async fn save_note(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(input): Json<SaveNote>,
) -> AppResult<impl IntoResponse> {
    let code = parse_code(&code)?;
    if let Some(ref user_id) = input.user_id {
        OwnerId::parse(user_id)?;
    }

    let note = match input.expected_updated_at {
        None => NoteRepo::upsert(&state.pool, &code, &input).await?,
        Some(expected) => {
            match NoteRepo::update_if_unchanged(&state.pool, &code, &input, expected).await? {
                Some(note) => note,
                None => {
                    if !NoteRepo::exists(&state.pool, &code).await? {
                        return Err(not_found(&code));
                    }
                    tracing::info!(code = %code, "Rejected stale note save");
                    return Err(AppError::Core(CoreError::Conflict(format!(
                        "Note {code} was modified since {expected}"
                    ))));
                }
            }
        }
    };

    tracing::debug!(code = %note.code, updated_at = %note.updated_at, "Note saved");

    Ok(Json(DataResponse { data: note }))
}

/// DELETE /notes/{code}
///
/// Unconditional delete by code; no ownership check. Deleting a code with
/// no note is not an error.
pub async fn delete_note(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    let code = parse_code(&code)?;
    if NoteRepo::delete_by_code(&state.pool, &code).await? {
        tracing::info!(code = %code, "Note deleted");
    } else {
        tracing::debug!(code = %code, "Delete matched no note");
    }

    Ok(StatusCode::NO_CONTENT)
}
