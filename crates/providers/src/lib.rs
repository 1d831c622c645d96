//! LLM Provider implementations for Recall.
//!
//! All providers implement the `recall_core::Provider` trait.
//! The connector builds the configured provider from an API key.

pub mod connector;
pub mod openai_compat;

pub use connector::{ConfigConnector, default_base_url};
pub use openai_compat::OpenAiCompatProvider;
