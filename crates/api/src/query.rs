//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Owner filter for list endpoints (`?user_id=`).
#[derive(Debug, Deserialize)]
pub struct OwnerParams {
    pub user_id: String,
}
