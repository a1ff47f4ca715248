//! JSON snapshot persistence for [`MemoryStore`].

use std::path::Path;

use thiserror::Error;

use crate::MemoryStore;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to access snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot {path} is not valid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl MemoryStore {
    /// Read a snapshot written by [`MemoryStore::save_snapshot`].
    ///
    /// A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the file exists but cannot be read or parsed.
    pub fn load_snapshot(path: &Path) -> Result<Self, SnapshotError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no snapshot found; starting empty");
                return Ok(Self::new());
            }
            Err(e) => {
                return Err(SnapshotError::Io {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };

        serde_json::from_str(&content).map_err(|e| SnapshotError::Json {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Write the full store as pretty JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if serialization or the write fails.
    pub fn save_snapshot(&self, path: &Path) -> Result<(), SnapshotError> {
        let io_err = |source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Json {
            path: path.display().to_string(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(io_err)
    }
}
