//! Anonymous owner id persisted per client profile.
//!
//! The id is generated on first use and stored in a small text file. It is
//! handed to views explicitly; nothing reads it from global state.

use std::io;
use std::path::{Path, PathBuf};

use codenote_core::error::CoreError;
use codenote_core::owner::OwnerId;

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Failed to access identity file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Identity file {path} holds an invalid owner id: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: CoreError,
    },
}

pub struct LocalIdentity;

impl LocalIdentity {
    /// Read the owner id stored at `path`, creating one if the file does not
    /// exist yet. Parent directories are created as needed.
    pub async fn load_or_create(path: &Path) -> Result<OwnerId, IdentityError> {
        match tokio::fs::read_to_string(path).await {
            Ok(raw) => OwnerId::parse(raw.trim()).map_err(|source| IdentityError::Invalid {
                path: path.to_path_buf(),
                source,
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let owner = OwnerId::generate();
                Self::store(path, &owner).await?;
                tracing::info!(path = %path.display(), "Generated new owner id");
                Ok(owner)
            }
            Err(source) => Err(IdentityError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    async fn store(path: &Path, owner: &OwnerId) -> Result<(), IdentityError> {
        let io_err = |source| IdentityError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        tokio::fs::write(path, format!("{owner}\n"))
            .await
            .map_err(io_err)
    }
}
