//! Per-channel conversation logs.
//!
//! Each channel is an independent, unbounded, append-only sequence until it
//! is cleared. Nothing is shared between channels.

use recall_core::message::{Channel, ConversationEntry, Role};

#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    main: Vec<ConversationEntry>,
    cot: Vec<ConversationEntry>,
    web_search: Vec<ConversationEntry>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn channel(&self, channel: Channel) -> &Vec<ConversationEntry> {
        match channel {
            Channel::Main => &self.main,
            Channel::ChainOfThought => &self.cot,
            Channel::WebSearch => &self.web_search,
        }
    }

    fn channel_mut(&mut self, channel: Channel) -> &mut Vec<ConversationEntry> {
        match channel {
            Channel::Main => &mut self.main,
            Channel::ChainOfThought => &mut self.cot,
            Channel::WebSearch => &mut self.web_search,
        }
    }

    /// Add an entry to the end of `channel`.
    pub fn append(&mut self, channel: Channel, role: Role, content: impl Into<String>) {
        self.channel_mut(channel).push(ConversationEntry {
            role,
            content: content.into(),
        });
    }

    /// The last `n` entries of `channel`, oldest first.
    pub fn recent(&self, channel: Channel, n: usize) -> &[ConversationEntry] {
        let entries = self.channel(channel);
        &entries[entries.len().saturating_sub(n)..]
    }

    /// Every entry of `channel`, oldest first.
    pub fn entries(&self, channel: Channel) -> &[ConversationEntry] {
        self.channel(channel)
    }

    /// Empty one channel, leaving the others alone.
    pub fn clear(&mut self, channel: Channel) {
        self.channel_mut(channel).clear();
    }

    pub fn len(&self, channel: Channel) -> usize {
        self.channel(channel).len()
    }

    pub fn is_empty(&self, channel: Channel) -> bool {
        self.channel(channel).is_empty()
    }
}
