//! Anonymous owner identifiers.
//!
//! Each client profile generates one [`OwnerId`] the first time it runs and
//! reuses it afterwards. The server never verifies that an owner id is
//! genuine or exclusive; it is only a tag used to scope the list view.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum length of an owner id.
pub const MAX_OWNER_ID_LENGTH: usize = 64;

/// A validated, client-generated owner tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerId(String);

impl OwnerId {
    /// Accepts 1 to 64 characters drawn from `[A-Za-z0-9_-]`.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        if input.is_empty() {
            return Err(CoreError::Validation("Owner id must not be empty".into()));
        }
        if input.len() > MAX_OWNER_ID_LENGTH {
            return Err(CoreError::Validation(format!(
                "Owner id must be at most {MAX_OWNER_ID_LENGTH} characters"
            )));
        }
        if !input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(CoreError::Validation(
                "Owner id may only contain letters, digits, '-' and '_'".into(),
            ));
        }
        Ok(Self(input.to_string()))
    }

    /// Generate a fresh random owner id (UUID v4, hyphenated).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for OwnerId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<OwnerId> for String {
    fn from(owner: OwnerId) -> Self {
        owner.0
    }
}
