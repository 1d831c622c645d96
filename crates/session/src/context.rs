//! Context assembly: turns a channel's history into one prompt string.
//!
//! Layout:
//!
//! ```text
//! {extra context}
//!
//! {channel header}:
//!
//! {role}: {content}      ← last 5 entries, oldest first
//!
//! User: {message}
//!
//! Assistant:
//! ```
//!
//! The window is a fixed 5 entries. Entries are not truncated or counted in
//! tokens, so a very long history entry produces a very long prompt.

use recall_core::message::{Channel, ConversationEntry};

/// All inputs for one assembled prompt.
pub struct AssemblyInput<'a> {
    /// Which log the history comes from (selects the header line).
    pub channel: Channel,
    /// The channel's history *before* the new message is appended.
    pub history: &'a [ConversationEntry],
    /// Text placed ahead of everything else, e.g. the URL hint.
    pub extra_context: Option<&'a str>,
    /// The new user message.
    pub user_message: &'a str,
}

/// Stateless prompt assembler.
pub struct ContextAssembler;

impl ContextAssembler {
    /// Number of history entries rendered into every prompt.
    pub const WINDOW: usize = 5;

    pub fn assemble(input: &AssemblyInput<'_>) -> String {
        let window = &input.history[input.history.len().saturating_sub(Self::WINDOW)..];
        let rendered = window
            .iter()
            .map(ConversationEntry::render)
            .collect::<Vec<_>>()
            .join("\n");

        let mut prompt = String::new();
        if let Some(extra) = input.extra_context.filter(|c| !c.is_empty()) {
            prompt.push_str(extra);
            prompt.push_str("\n\n");
        }
        prompt.push_str(Self::header(input.channel));
        prompt.push_str(":\n\n");
        prompt.push_str(&rendered);
        prompt.push_str("\n\nUser: ");
        prompt.push_str(input.user_message);
        prompt.push_str("\n\nAssistant:");
        prompt
    }

    fn header(channel: Channel) -> &'static str {
        match channel {
            Channel::Main => "Based on the following conversation",
            Channel::ChainOfThought => "Based on the following Chain of Thought conversation",
            Channel::WebSearch => "Based on the following web search conversation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(n: usize) -> Vec<ConversationEntry> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    ConversationEntry::user(format!("q{i}"))
                } else {
                    ConversationEntry::assistant(format!("a{i}"))
                }
            })
            .collect()
    }

    #[test]
    fn renders_full_layout() {
        let history = history(2);
        let prompt = ContextAssembler::assemble(&AssemblyInput {
            channel: Channel::Main,
            history: &history,
            extra_context: Some("Consider the following URLs for context: https://a.example"),
            user_message: "next?",
        });

        assert_eq!(
            prompt,
            "Consider the following URLs for context: https://a.example\n\n\
             Based on the following conversation:\n\n\
             user: q0\nassistant: a1\n\n\
             User: next?\n\nAssistant:"
        );
    }

    #[test]
    fn only_last_five_entries_are_rendered() {
        let history = history(12);
        let prompt = ContextAssembler::assemble(&AssemblyInput {
            channel: Channel::Main,
            history: &history,
            extra_context: None,
            user_message: "hi",
        });

        assert!(!prompt.contains("a5\n"));
        assert!(!prompt.contains("q6\n"));
        for kept in ["a7", "q8", "a9", "q10", "a11"] {
            assert!(prompt.contains(kept), "missing {kept}");
        }
        let first = prompt.find("a7").unwrap();
        let last = prompt.find("a11").unwrap();
        assert!(first < last);
    }

    #[test]
    fn no_extra_context_starts_at_header() {
        let prompt = ContextAssembler::assemble(&AssemblyInput {
            channel: Channel::ChainOfThought,
            history: &[],
            extra_context: Some(""),
            user_message: "why?",
        });
        assert!(prompt.starts_with("Based on the following Chain of Thought conversation:"));
        assert!(prompt.ends_with("User: why?\n\nAssistant:"));
    }

    #[test]
    fn web_search_header() {
        let prompt = ContextAssembler::assemble(&AssemblyInput {
            channel: Channel::WebSearch,
            history: &[],
            extra_context: None,
            user_message: "rust 2024 edition",
        });
        assert!(prompt.starts_with("Based on the following web search conversation:"));
    }

    #[test]
    fn long_entries_pass_through_verbatim() {
        let long = "x".repeat(50_000);
        let history = vec![ConversationEntry::user(long.clone())];
        let prompt = ContextAssembler::assemble(&AssemblyInput {
            channel: Channel::Main,
            history: &history,
            extra_context: None,
            user_message: "?",
        });
        assert!(prompt.contains(&long));
    }
}
