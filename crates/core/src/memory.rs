//! Memory model: the persisted key-value store of past interactions.
//!
//! Keys are either one of a few well-known markers or a raw user prompt
//! used as a free-form cache key. Values are a small tagged union so the
//! store can hold summaries, the improvement list, and the last
//! self-improvement analysis side by side.
//!
//! The serialized form is a plain object: well-known keys by their literal
//! names, prompt keys verbatim, values as strings, string arrays or records.

use crate::error::MemoryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A key in the memory map.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MemoryKey {
    /// `"improvements"`: every applied improvement, in order
    Improvements,
    /// `"self_improvement"`: the last full analysis
    SelfImprovement,
    /// `"suggested_improvements"`: the last implementation suggestions
    SuggestedImprovements,
    /// `"quick_assessment"`: the last periodic quick assessment
    QuickAssessment,
    /// A raw user prompt, mapped to a summary of its exchange
    Prompt(String),
}

impl MemoryKey {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Improvements => "improvements",
            Self::SelfImprovement => "self_improvement",
            Self::SuggestedImprovements => "suggested_improvements",
            Self::QuickAssessment => "quick_assessment",
            Self::Prompt(p) => p,
        }
    }

    /// Key for a user prompt. A prompt spelled like a well-known key
    /// resolves to that key.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self::from(text.into())
    }

    pub fn is_well_known(&self) -> bool {
        !matches!(self, Self::Prompt(_))
    }
}

impl From<String> for MemoryKey {
    fn from(s: String) -> Self {
        match s.as_str() {
            "improvements" => Self::Improvements,
            "self_improvement" => Self::SelfImprovement,
            "suggested_improvements" => Self::SuggestedImprovements,
            "quick_assessment" => Self::QuickAssessment,
            _ => Self::Prompt(s),
        }
    }
}

impl From<MemoryKey> for String {
    fn from(key: MemoryKey) -> Self {
        match key {
            MemoryKey::Prompt(p) => p,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for MemoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of a full self-improvement analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfImprovementRecord {
    pub last_analysis: String,
    pub action_items: String,
    /// Interaction count when the analysis ran
    pub timestamp: u64,
}

/// A value in the memory map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemoryValue {
    Text(String),
    List(Vec<String>),
    Analysis(SelfImprovementRecord),
}

impl MemoryValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<String> for MemoryValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for MemoryValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// The whole memory map. Last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Memory {
    entries: BTreeMap<MemoryKey, MemoryValue>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &MemoryKey) -> Option<&MemoryValue> {
        self.entries.get(key)
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, key: MemoryKey, value: impl Into<MemoryValue>) -> Option<MemoryValue> {
        self.entries.insert(key, value.into())
    }

    /// Text stored under `key`, if the value is text.
    pub fn text(&self, key: &MemoryKey) -> Option<&str> {
        self.get(key).and_then(MemoryValue::as_text)
    }

    /// The applied improvements. A lone text value counts as one item.
    pub fn improvements(&self) -> Vec<String> {
        match self.get(&MemoryKey::Improvements) {
            Some(MemoryValue::List(items)) => items.clone(),
            Some(MemoryValue::Text(item)) => vec![item.clone()],
            _ => Vec::new(),
        }
    }

    pub fn self_improvement(&self) -> Option<&SelfImprovementRecord> {
        match self.get(&MemoryKey::SelfImprovement) {
            Some(MemoryValue::Analysis(record)) => Some(record),
            _ => None,
        }
    }

    /// Interaction count of the last full analysis, 0 when none ran.
    pub fn last_analysis_timestamp(&self) -> u64 {
        self.self_improvement().map_or(0, |r| r.timestamp)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MemoryKey, &MemoryValue)> {
        self.entries.iter()
    }
}

impl FromIterator<(MemoryKey, MemoryValue)> for Memory {
    fn from_iter<I: IntoIterator<Item = (MemoryKey, MemoryValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Where a `Memory` lives between sessions.
///
/// Implementations: file (MessagePack), in-memory (for testing and
/// ephemeral sessions).
pub trait MemoryBackend: Send + Sync {
    /// The backend name (e.g., "file", "in_memory").
    fn name(&self) -> &str;

    /// Read the stored memory. A backend with nothing stored yet returns an
    /// empty memory, not an error.
    fn load(&self) -> std::result::Result<Memory, MemoryError>;

    /// Replace the stored memory with `memory`.
    fn save(&self, memory: &Memory) -> std::result::Result<(), MemoryError>;
}
