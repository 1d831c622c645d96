//! The session context: everything one user's run of the assistant owns.
//!
//! Replaces ambient global state with one explicit object. The presentation
//! layer holds it by `&mut` and calls one operation per user action; every
//! operation returns `recall_core::Result` so errors surface uniformly.

use crate::assessment::{AssessmentKind, AssessmentOutcome, AssessmentPolicy};
use crate::client::{GenerationClient, GenerationSettings};
use crate::context::{AssemblyInput, ContextAssembler};
use crate::log::ConversationLog;
use crate::prompts;
use recall_core::error::{Error, ProviderError, Result};
use recall_core::memory::{Memory, MemoryKey, MemoryValue, SelfImprovementRecord};
use recall_core::message::{Channel, ConversationEntry, Role};
use recall_core::provider::ProviderConnector;
use recall_memory::MemoryStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Main-channel entries quoted into a full self-improvement analysis.
const ANALYSIS_HISTORY: usize = 10;

/// Main-channel entries quoted into a quick assessment.
const QUICK_HISTORY: usize = 5;

/// The three texts a self-improvement cycle produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfImprovementReport {
    pub analysis: String,
    pub action_items: String,
    pub suggested_improvements: String,
}

pub struct Session {
    store: MemoryStore,
    log: ConversationLog,
    connector: Arc<dyn ProviderConnector>,
    settings: GenerationSettings,
    client: Option<GenerationClient>,
    url_cache: Vec<String>,
    improvements: Vec<String>,
    interaction_count: u64,
}

impl Session {
    /// Start a session over an opened store. No credential is set yet.
    pub fn new(
        store: MemoryStore,
        connector: Arc<dyn ProviderConnector>,
        settings: GenerationSettings,
    ) -> Self {
        let improvements = store.memory().improvements();
        Self {
            store,
            log: ConversationLog::new(),
            connector,
            settings,
            client: None,
            url_cache: Vec::new(),
            improvements,
            interaction_count: 0,
        }
    }

    // ── Credential ──

    /// Build a generation client from `api_key`, replacing any previous one.
    /// On failure the session is left without a client.
    pub fn establish_credential(&mut self, api_key: &str) -> Result<()> {
        match self.connector.connect(api_key) {
            Ok(provider) => {
                info!(provider = %provider.name(), "Credential established");
                self.client = Some(GenerationClient::new(provider, self.settings.clone()));
                Ok(())
            }
            Err(e) => {
                self.client = None;
                Err(match e {
                    ProviderError::MissingCredential(provider) => {
                        Error::MissingCredential(format!("no API key provided for {provider}"))
                    }
                    other => other.into(),
                })
            }
        }
    }

    /// Ask the provider whether the current credential works. A rejected
    /// key is dropped.
    pub async fn verify_credential(&mut self) -> Result<bool> {
        let client = self.client()?;
        match client.health_check().await {
            Err(ProviderError::AuthenticationFailed(reason)) => {
                self.revoke_credential();
                Err(Error::MissingCredential(reason))
            }
            other => other.map_err(Error::from),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.client.is_some()
    }

    pub fn revoke_credential(&mut self) {
        if self.client.take().is_some() {
            info!("Credential revoked");
        }
    }

    fn client(&self) -> Result<GenerationClient> {
        self.client
            .clone()
            .ok_or_else(|| Error::MissingCredential("no valid API key has been set".into()))
    }

    /// Single path for generation calls. A rejected key disables the client.
    async fn generate(&mut self, prompt: &str) -> Result<String> {
        let client = self.client()?;
        match client.generate(prompt).await {
            Ok(text) => Ok(text),
            Err(ProviderError::AuthenticationFailed(reason)) => {
                warn!(%reason, "Provider rejected the credential");
                self.revoke_credential();
                Err(Error::MissingCredential(reason))
            }
            Err(e) => Err(e.into()),
        }
    }

    // ── Conversations ──

    /// One exchange on the main channel. The exchange is summarized into
    /// memory under the user's message.
    pub async fn chat(&mut self, message: &str) -> Result<String> {
        require_text(message, "message")?;

        let hint = prompts::url_hint(self.url_cache.iter().map(String::as_str));
        let prompt = ContextAssembler::assemble(&AssemblyInput {
            channel: Channel::Main,
            history: self.log.entries(Channel::Main),
            extra_context: hint.as_deref(),
            user_message: message,
        });

        let response = self.generate(&prompt).await?;
        self.log.append(Channel::Main, Role::User, message);
        self.log.append(Channel::Main, Role::Assistant, response.as_str());

        let summary = self
            .generate(&prompts::memory_summary(message, &response))
            .await?;
        self.store.insert(MemoryKey::prompt(message), summary)?;

        self.interaction_count += 1;
        debug!(count = self.interaction_count, "Main exchange complete");
        Ok(response)
    }

    /// One exchange on the chain-of-thought channel.
    pub async fn chain_of_thought(&mut self, message: &str) -> Result<String> {
        self.side_channel(Channel::ChainOfThought, message).await
    }

    /// One exchange on the web-search channel.
    pub async fn web_search(&mut self, message: &str) -> Result<String> {
        self.side_channel(Channel::WebSearch, message).await
    }

    async fn side_channel(&mut self, channel: Channel, message: &str) -> Result<String> {
        require_text(message, "message")?;

        let prompt = ContextAssembler::assemble(&AssemblyInput {
            channel,
            history: self.log.entries(channel),
            extra_context: None,
            user_message: message,
        });

        let response = self.generate(&prompt).await?;
        self.log.append(channel, Role::User, message);
        self.log.append(channel, Role::Assistant, response.as_str());

        self.interaction_count += 1;
        debug!(%channel, count = self.interaction_count, "Exchange complete");
        Ok(response)
    }

    /// Send an image URL to the model as-is. Not logged, not counted.
    pub async fn analyze_image(&mut self, image_url: &str) -> Result<String> {
        require_text(image_url, "image URL")?;
        self.generate(image_url.trim()).await
    }

    pub fn entries(&self, channel: Channel) -> &[ConversationEntry] {
        self.log.entries(channel)
    }

    pub fn clear(&mut self, channel: Channel) {
        self.log.clear(channel);
        debug!(%channel, "Channel cleared");
    }

    // ── URL context ──

    /// Remember a URL for the main-channel context hint. Returns `false` if
    /// it was already known.
    pub fn add_url(&mut self, url: &str) -> Result<bool> {
        let url = require_text(url, "URL")?;
        if self.url_cache.iter().any(|u| u == url) {
            return Ok(false);
        }
        self.url_cache.push(url.to_string());
        Ok(true)
    }

    pub fn urls(&self) -> &[String] {
        &self.url_cache
    }

    // ── Self-improvement ──

    /// Run a full analysis → action items → implementation suggestions
    /// cycle, storing each result in memory as it arrives.
    pub async fn self_improvement(&mut self) -> Result<SelfImprovementReport> {
        let history = prompts::clipped_history(self.log.recent(Channel::Main, ANALYSIS_HISTORY))?;
        let memory_json = self.store.export()?;

        let analysis = self
            .generate(&prompts::self_analysis(&history, &memory_json))
            .await?;
        let action_items = self.generate(&prompts::action_items(&analysis)).await?;

        self.store.insert(
            MemoryKey::SelfImprovement,
            MemoryValue::Analysis(SelfImprovementRecord {
                last_analysis: analysis.clone(),
                action_items: action_items.clone(),
                timestamp: self.interaction_count,
            }),
        )?;

        let suggested_improvements = self.generate(&prompts::implementation(&action_items)).await?;
        self.store.insert(
            MemoryKey::SuggestedImprovements,
            suggested_improvements.as_str(),
        )?;

        info!(at = self.interaction_count, "Self-improvement analysis stored");
        Ok(SelfImprovementReport {
            analysis,
            action_items,
            suggested_improvements,
        })
    }

    /// Record an improvement and mirror the full list into memory.
    pub fn apply_improvements(&mut self, improvement: &str) -> Result<()> {
        let improvement = require_text(improvement, "improvement")?;
        let mut improvements = self.improvements.clone();
        improvements.push(improvement.to_string());
        self.store
            .insert(MemoryKey::Improvements, MemoryValue::List(improvements.clone()))?;
        self.improvements = improvements;
        Ok(())
    }

    /// Apply the suggestions stored by the last self-improvement cycle.
    pub fn apply_suggested(&mut self) -> Result<String> {
        let suggested = self
            .store
            .memory()
            .text(&MemoryKey::SuggestedImprovements)
            .map(String::from)
            .ok_or_else(|| {
                Error::InvalidInput(
                    "no suggested improvements yet; run a self-improvement analysis first".into(),
                )
            })?;
        self.apply_improvements(&suggested)?;
        Ok(suggested)
    }

    /// Improvements as currently persisted.
    pub fn verify_improvements(&self) -> Vec<String> {
        self.store.memory().improvements()
    }

    /// Run the periodic check for the current interaction count.
    pub async fn periodic_assessment(&mut self) -> Result<Option<AssessmentOutcome>> {
        let last = self.store.memory().last_analysis_timestamp();
        match AssessmentPolicy::decide(self.interaction_count, last) {
            None => Ok(None),
            Some(AssessmentKind::Full) => {
                info!(count = self.interaction_count, last, "Full self-improvement analysis due");
                Ok(Some(AssessmentOutcome::FullAnalysisDue))
            }
            Some(AssessmentKind::Quick) => {
                let history =
                    prompts::clipped_history(self.log.recent(Channel::Main, QUICK_HISTORY))?;
                let improvements = serde_json::to_string(&self.improvements)?;
                let assessment = self
                    .generate(&prompts::quick_assessment(&history, &improvements))
                    .await?;
                self.store
                    .insert(MemoryKey::QuickAssessment, assessment.as_str())?;
                Ok(Some(AssessmentOutcome::Quick(assessment)))
            }
        }
    }

    // ── Memory ──

    pub fn memory(&self) -> &Memory {
        self.store.memory()
    }

    pub fn export_memory(&self) -> Result<String> {
        Ok(self.store.export()?)
    }

    /// Replace the memory with an exported JSON object. Malformed input is
    /// rejected and the current memory kept.
    pub fn import_memory(&mut self, json: &str) -> Result<()> {
        self.store.import(json)?;
        self.improvements = self.store.memory().improvements();
        Ok(())
    }

    pub fn interaction_count(&self) -> u64 {
        self.interaction_count
    }
}

fn require_text<'a>(text: &'a str, what: &str) -> Result<&'a str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{what} must not be empty")));
    }
    Ok(trimmed)
}
