//! The conversation session: the heart of Recall.
//!
//! A [`Session`] owns everything one run of the assistant needs:
//!
//! 1. **Three logs**: main chat, chain-of-thought and web search
//! 2. **A persistent memory** of summarized exchanges and improvements
//! 3. **A generation client**, present only once a credential is accepted
//! 4. **An interaction counter** that drives periodic self-assessment
//!
//! Every main-channel exchange is summarized by the model and stored under
//! the user's message. Every tenth exchange triggers either a quick
//! assessment or a prompt to run a full self-improvement cycle.

pub mod assessment;
pub mod client;
pub mod context;
pub mod log;
pub mod prompts;
pub mod session;

#[cfg(test)]
mod test_helpers;

pub use assessment::{AssessmentKind, AssessmentOutcome, AssessmentPolicy};
pub use client::{GenerationClient, GenerationSettings};
pub use context::{AssemblyInput, ContextAssembler};
pub use log::ConversationLog;
pub use session::{SelfImprovementReport, Session};
