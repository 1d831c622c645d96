//! In-memory backend: useful for testing and ephemeral sessions.

use recall_core::error::MemoryError;
use recall_core::memory::{Memory, MemoryBackend};
use std::sync::{Arc, RwLock};

/// Keeps the last saved snapshot in process.
///
/// Clones share the same snapshot, so a test can hand one clone to a store
/// and inspect what was persisted through the other.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    snapshot: Arc<RwLock<Memory>>,
    saves: Arc<RwLock<usize>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `memory` already "on disk".
    pub fn with_memory(memory: Memory) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(memory)),
            saves: Arc::default(),
        }
    }

    /// Number of completed saves.
    pub fn save_count(&self) -> usize {
        self.saves.read().map(|n| *n).unwrap_or(0)
    }
}

impl MemoryBackend for InMemoryBackend {
    fn name(&self) -> &str {
        "in_memory"
    }

    fn load(&self) -> Result<Memory, MemoryError> {
        self.snapshot
            .read()
            .map(|m| m.clone())
            .map_err(|e| MemoryError::Storage(format!("memory snapshot poisoned: {e}")))
    }

    fn save(&self, memory: &Memory) -> Result<(), MemoryError> {
        let mut snapshot = self
            .snapshot
            .write()
            .map_err(|e| MemoryError::Storage(format!("memory snapshot poisoned: {e}")))?;
        let mut saves = self
            .saves
            .write()
            .map_err(|e| MemoryError::Storage(format!("save counter poisoned: {e}")))?;
        *snapshot = memory.clone();
        *saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::memory::MemoryKey;

    #[test]
    fn starts_empty() {
        let backend = InMemoryBackend::new();
        assert!(backend.load().unwrap().is_empty());
        assert_eq!(backend.save_count(), 0);
    }

    #[test]
    fn clones_share_snapshot() {
        let backend = InMemoryBackend::new();
        let observer = backend.clone();

        let mut memory = Memory::new();
        memory.insert(MemoryKey::prompt("k"), "v");
        backend.save(&memory).unwrap();

        assert_eq!(observer.load().unwrap(), memory);
        assert_eq!(observer.save_count(), 1);
    }

    #[test]
    fn poisoned_counter_fails_the_save() {
        let backend = InMemoryBackend::new();
        let saves = backend.saves.clone();
        let _ = std::thread::spawn(move || {
            let _guard = saves.write().unwrap();
            panic!("poison the counter");
        })
        .join();

        let mut memory = Memory::new();
        memory.insert(MemoryKey::prompt("k"), "v");
        let err = backend.save(&memory).unwrap_err();
        assert!(matches!(err, MemoryError::Storage(_)));
        assert!(backend.load().unwrap().is_empty());
    }
}
