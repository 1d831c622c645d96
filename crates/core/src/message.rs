//! Conversation entry and channel domain types.
//!
//! These are the value objects that flow through a session:
//! User types a message → Session assembles a prompt → Provider answers →
//! both sides are appended to the channel's log as `ConversationEntry`s.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The AI assistant
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry in a channel's conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEntry {
    /// Who wrote this entry
    pub role: Role,

    /// The text content
    pub content: String,
}

impl ConversationEntry {
    /// Create a user entry.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant entry.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Render as a `role: content` prompt line.
    pub fn render(&self) -> String {
        format!("{}: {}", self.role, self.content)
    }

    /// Render as a prompt line with the content cut to `max_chars`
    /// characters, followed by `...`.
    pub fn render_clipped(&self, max_chars: usize) -> String {
        let clipped: String = self.content.chars().take(max_chars).collect();
        format!("{}: {}...", self.role, clipped)
    }
}

/// One of the independent conversation logs of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// The primary chat
    Main,
    /// "Chain of Thought" log
    #[serde(rename = "cot")]
    ChainOfThought,
    /// "Web Search" log
    WebSearch,
}

impl Channel {
    /// Every channel, in display order.
    pub const ALL: [Channel; 3] = [Channel::Main, Channel::ChainOfThought, Channel::WebSearch];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::ChainOfThought => "cot",
            Self::WebSearch => "web_search",
        }
    }

    /// Human-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Main => "Conversation",
            Self::ChainOfThought => "Chain of Thought",
            Self::WebSearch => "Web Search",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" | "conversation" => Ok(Self::Main),
            "cot" | "chain-of-thought" | "chain_of_thought" => Ok(Self::ChainOfThought),
            "web_search" | "web-search" | "web" => Ok(Self::WebSearch),
            other => Err(format!(
                "unknown channel '{other}' (expected main, cot or web_search)"
            )),
        }
    }
}
