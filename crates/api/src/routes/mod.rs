pub mod health;
pub mod notes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /notes                                           list (?user_id), create
/// /notes/{code}                                    get, save, delete
/// /notes/{code}/exists                             existence check
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/notes", notes::router())
}
