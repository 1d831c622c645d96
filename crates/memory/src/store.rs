//! The session's memory store: the loaded map plus the backend it came from.
//!
//! Every mutation is written through to the backend before returning.

use recall_core::error::MemoryError;
use recall_core::memory::{Memory, MemoryBackend, MemoryKey, MemoryValue};
use tracing::{debug, info};

pub struct MemoryStore {
    backend: Box<dyn MemoryBackend>,
    memory: Memory,
}

impl MemoryStore {
    /// Load the memory from `backend`. A missing file yields an empty store;
    /// any other failure propagates.
    pub fn open(backend: Box<dyn MemoryBackend>) -> Result<Self, MemoryError> {
        let memory = backend.load()?;
        debug!(backend = backend.name(), count = memory.len(), "Memory store opened");
        Ok(Self { backend, memory })
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Set `key` and persist. The in-memory map changes only once the
    /// backend has accepted the write.
    pub fn insert(&mut self, key: MemoryKey, value: impl Into<MemoryValue>) -> Result<(), MemoryError> {
        let mut next = self.memory.clone();
        next.insert(key, value);
        self.backend.save(&next)?;
        self.memory = next;
        Ok(())
    }

    /// The map as a JSON object.
    pub fn export(&self) -> Result<String, MemoryError> {
        serde_json::to_string(&self.memory)
            .map_err(|e| MemoryError::Storage(format!("Failed to export memory: {e}")))
    }

    /// Same as `export`, indented for people.
    pub fn export_pretty(&self) -> Result<String, MemoryError> {
        serde_json::to_string_pretty(&self.memory)
            .map_err(|e| MemoryError::Storage(format!("Failed to export memory: {e}")))
    }

    /// Replace the whole map with the JSON object in `text` and persist.
    ///
    /// Malformed input fails with `MemoryError::Format` and a failed save
    /// with `MemoryError::Storage`; either way the current map is untouched.
    pub fn import(&mut self, text: &str) -> Result<(), MemoryError> {
        let imported: Memory =
            serde_json::from_str(text).map_err(|e| MemoryError::Format(e.to_string()))?;

        let count = imported.len();
        self.backend.save(&imported)?;
        self.memory = imported;
        info!(count, "Memory imported");
        Ok(())
    }
}
