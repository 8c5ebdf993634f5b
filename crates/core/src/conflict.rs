//! Write policy for concurrent editors of the same note.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How a save treats a note that changed since the editor last saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// Every save overwrites the stored title and content. The save that
    /// completes last determines the stored note.
    #[default]
    LastWriteWins,
    /// Saves carry the `updated_at` the editor last observed and are rejected
    /// when the stored note has moved on (compare-and-swap).
    RejectStale,
}

impl ConflictPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            ConflictPolicy::LastWriteWins => "last-write-wins",
            ConflictPolicy::RejectStale => "reject-stale",
        }
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConflictPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last-write-wins" => Ok(ConflictPolicy::LastWriteWins),
            "reject-stale" => Ok(ConflictPolicy::RejectStale),
            other => Err(CoreError::Validation(format!(
                "Unknown conflict policy '{other}', expected 'last-write-wins' or 'reject-stale'"
            ))),
        }
    }
}
