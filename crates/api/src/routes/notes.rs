//! Route definitions for shared notes.
//!
//! Mounted at `/notes` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// Note routes.
///
/// ```text
/// GET    /                   -> list_notes (?user_id)
/// POST   /                   -> create_note
/// GET    /{code}             -> get_note
/// PUT    /{code}             -> save_note
/// DELETE /{code}             -> delete_note
/// GET    /{code}/exists      -> note_exists
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notes::list_notes).post(notes::create_note))
        .route(
            "/{code}",
            get(notes::get_note)
                .put(notes::save_note)
                .delete(notes::delete_note),
        )
        .route("/{code}/exists", get(notes::note_exists))
}
