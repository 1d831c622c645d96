//! File-based memory backend: a single MessagePack file.
//!
//! The whole map is encoded on every save and the file is overwritten in
//! place. There is no write-ahead log or temp-file rename: a crash during
//! `save` can leave a truncated file, which the next `load` reports as a
//! storage error.
//!
//! Records are written with named fields (`rmp_serde::to_vec_named`) so the
//! untagged value union decodes them as maps, not positional arrays.

use recall_core::error::MemoryError;
use recall_core::memory::{Memory, MemoryBackend};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A file-backed memory store.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MemoryBackend for FileBackend {
    fn name(&self) -> &str {
        "file"
    }

    fn load(&self) -> Result<Memory, MemoryError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No memory file yet, starting empty");
                return Ok(Memory::new());
            }
            Err(e) => {
                return Err(MemoryError::Storage(format!(
                    "Failed to read memory file {}: {e}",
                    self.path.display()
                )));
            }
        };

        let memory: Memory = rmp_serde::from_slice(&bytes).map_err(|e| {
            MemoryError::Storage(format!(
                "Failed to decode memory file {}: {e}",
                self.path.display()
            ))
        })?;

        debug!(path = %self.path.display(), count = memory.len(), "Memory file loaded");
        Ok(memory)
    }

    fn save(&self, memory: &Memory) -> Result<(), MemoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                MemoryError::Storage(format!("Failed to create memory directory: {e}"))
            })?;
        }

        let bytes = rmp_serde::to_vec_named(memory)
            .map_err(|e| MemoryError::Storage(format!("Failed to encode memory: {e}")))?;

        std::fs::write(&self.path, &bytes)
            .map_err(|e| MemoryError::Storage(format!("Failed to write memory file: {e}")))?;

        debug!(path = %self.path.display(), count = memory.len(), bytes = bytes.len(), "Memory saved");
        Ok(())
    }
}
