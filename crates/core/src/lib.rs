//! # Recall Core
//!
//! Domain types, traits, and error definitions for the Recall assistant.
//! This crate has **no I/O of its own**: it defines the domain model
//! that the other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator is a trait here. Implementations live in their
//! respective crates:
//! - `Provider` / `ProviderConnector` → `recall-providers`
//! - `MemoryBackend` → `recall-memory`

pub mod error;
pub mod memory;
pub mod message;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use error::{Error, MemoryError, ProviderError, Result};
pub use memory::{Memory, MemoryBackend, MemoryKey, MemoryValue, SelfImprovementRecord};
pub use message::{Channel, ConversationEntry, Role};
pub use provider::{Provider, ProviderConnector, ProviderRequest, ProviderResponse, Usage};
