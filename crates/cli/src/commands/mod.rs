//! Command handlers and the wiring they share.

pub mod chat;
pub mod memory;
pub mod onboard;

use recall_config::{AppConfig, ConfigError, MemoryBackendKind};
use recall_core::Error;
use recall_memory::{FileBackend, InMemoryBackend, MemoryStore};

pub(crate) fn load_config() -> Result<AppConfig, Error> {
    AppConfig::load().map_err(config_error)
}

fn config_error(e: ConfigError) -> Error {
    Error::Config {
        message: e.to_string(),
    }
}

/// Open the memory store the configuration names. `ephemeral` forces an
/// in-process store.
pub(crate) fn open_store(
    config: &AppConfig,
    ephemeral: bool,
) -> Result<MemoryStore, Box<dyn std::error::Error>> {
    let store = match (ephemeral, config.memory.backend) {
        (false, MemoryBackendKind::File) => {
            MemoryStore::open(Box::new(FileBackend::new(&config.memory.path)))
        }
        _ => MemoryStore::open(Box::new(InMemoryBackend::new())),
    };
    Ok(store.map_err(|e| format!("Failed to open memory: {e}"))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::memory::MemoryKey;

    #[test]
    fn config_failures_become_config_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "temperature = \"hot\"").unwrap();

        let err = config_error(AppConfig::load_from(&path).unwrap_err());
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().starts_with("Configuration error:"));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn file_backend_reads_configured_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.memory.path = dir.path().join("mem.msgpack");

        let mut store = open_store(&config, false).unwrap();
        assert_eq!(store.backend_name(), "file");
        store.insert(MemoryKey::prompt("hi"), "greeting").unwrap();
        assert!(config.memory.path.exists());

        let reopened = open_store(&config, false).unwrap();
        assert_eq!(reopened.memory().text(&MemoryKey::prompt("hi")), Some("greeting"));
    }

    #[test]
    fn ephemeral_never_touches_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.memory.path = dir.path().join("mem.msgpack");

        let mut store = open_store(&config, true).unwrap();
        assert_eq!(store.backend_name(), "in_memory");
        store.insert(MemoryKey::prompt("hi"), "greeting").unwrap();
        assert!(!config.memory.path.exists());
    }
}
