//! Study assistant.
//!
//! The assistant only sees text generation through the [`TextGenerator`]
//! capability. [`StudyAssistant`] adds the portal's rules around it: blank
//! prompts are ignored, a remote generator needs a usable API key, an empty
//! reply becomes [`NO_RESPONSE`]. Each request carries the configured
//! [`GenerationSettings`]. [`FaqResponder`] is the bundled offline generator
//! answering from the FAQ.

use campus_query::Criteria;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AssistantConfig;
use crate::model::FaqItem;

/// Reply used when the generator returns nothing.
pub const NO_RESPONSE: &str = "No response from AI.";

/// Message shown instead of a reply when the assistant fails.
pub const APOLOGY: &str = "Erreur lors de la communication avec l'IA.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssistantError {
    #[error("text generation service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("text generation is not configured: {0}")]
    InvalidConfiguration(String),

    #[error("prompt is empty")]
    EmptyPrompt,
}

/// Model parameters sent along with every prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationSettings {
    pub model: String,
    pub system_instruction: String,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub thinking_budget: u32,
}

impl From<&AssistantConfig> for GenerationSettings {
    fn from(config: &AssistantConfig) -> Self {
        GenerationSettings {
            model: config.model.clone(),
            system_instruction: config.system_instruction.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
            top_k: config.top_k,
            max_output_tokens: config.max_output_tokens,
            thinking_budget: config.thinking_budget,
        }
    }
}

/// Something that turns a prompt into text.
pub trait TextGenerator {
    fn generate_text(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, AssistantError>;

    /// Whether calls need an API key. Remote services do.
    fn requires_api_key(&self) -> bool {
        true
    }
}

impl<G: TextGenerator + ?Sized> TextGenerator for &G {
    fn generate_text(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, AssistantError> {
        (**self).generate_text(prompt, settings)
    }

    fn requires_api_key(&self) -> bool {
        (**self).requires_api_key()
    }
}

impl<G: TextGenerator + ?Sized> TextGenerator for Box<G> {
    fn generate_text(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, AssistantError> {
        (**self).generate_text(prompt, settings)
    }

    fn requires_api_key(&self) -> bool {
        (**self).requires_api_key()
    }
}

/// A generator wrapped with the portal's rules.
#[derive(Debug, Clone)]
pub struct StudyAssistant<G> {
    generator: G,
    config: AssistantConfig,
    settings: GenerationSettings,
}

impl<G: TextGenerator> StudyAssistant<G> {
    pub fn new(generator: G, config: AssistantConfig) -> Self {
        let settings = GenerationSettings::from(&config);
        StudyAssistant {
            generator,
            config,
            settings,
        }
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// The settings passed to the generator with each prompt.
    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Asks the generator.
    ///
    /// # Errors
    ///
    /// [`AssistantError::EmptyPrompt`] for a blank prompt,
    /// [`AssistantError::InvalidConfiguration`] when the generator needs a key
    /// and none is usable, or whatever the generator reports.
    pub fn ask(&self, prompt: &str) -> Result<String, AssistantError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(AssistantError::EmptyPrompt);
        }
        if self.generator.requires_api_key() && self.config.usable_api_key().is_none() {
            return Err(AssistantError::InvalidConfiguration(
                "API key is not set".to_string(),
            ));
        }

        debug!(
            model = %self.settings.model,
            temperature = self.settings.temperature,
            chars = prompt.len(),
            "asking assistant"
        );
        let reply = self.generator.generate_text(prompt, &self.settings)?;
        if reply.trim().is_empty() {
            warn!("assistant returned an empty reply");
            return Ok(NO_RESPONSE.to_string());
        }
        Ok(reply)
    }

    /// Like [`ask`](Self::ask), but failures become [`APOLOGY`].
    ///
    /// Returns `None` for a blank prompt, which is not sent at all.
    pub fn ask_or_apologize(&self, prompt: &str) -> Option<String> {
        match self.ask(prompt) {
            Ok(reply) => Some(reply),
            Err(AssistantError::EmptyPrompt) => None,
            Err(err) => {
                warn!(error = %err, "assistant request failed");
                Some(APOLOGY.to_string())
            }
        }
    }
}

/// Offline generator answering from FAQ entries.
///
/// Every word of four letters or more in the prompt is searched in the
/// questions and answers; the entry matching the most words wins, the
/// earliest one on ties. Generation settings do not apply.
#[derive(Debug, Clone)]
pub struct FaqResponder {
    faqs: Vec<FaqItem>,
}

/// Words shorter than this are ignored when matching the FAQ.
const MIN_WORD_LEN: usize = 4;

impl FaqResponder {
    pub fn new(faqs: Vec<FaqItem>) -> Self {
        FaqResponder { faqs }
    }

    /// The best matching FAQ entry for a prompt.
    pub fn best_match(&self, prompt: &str) -> Option<&FaqItem> {
        let mut hits = vec![0usize; self.faqs.len()];

        for word in prompt
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() >= MIN_WORD_LEN)
        {
            let criteria = Criteria::new().search(word);
            for (i, faq) in self.faqs.iter().enumerate() {
                if criteria.matches(faq) {
                    hits[i] += 1;
                }
            }
        }

        let (best, count) = hits
            .iter()
            .enumerate()
            .fold((0, 0), |acc, (i, &n)| if n > acc.1 { (i, n) } else { acc });
        if count == 0 {
            return None;
        }
        self.faqs.get(best)
    }
}

impl TextGenerator for FaqResponder {
    fn generate_text(
        &self,
        prompt: &str,
        _settings: &GenerationSettings,
    ) -> Result<String, AssistantError> {
        match self.best_match(prompt) {
            Some(faq) => {
                debug!(faq = %faq.id, "answered from FAQ");
                Ok(faq.answer.clone())
            }
            None => Err(AssistantError::ServiceUnavailable(
                "no FAQ entry matches the question".to_string(),
            )),
        }
    }

    fn requires_api_key(&self) -> bool {
        false
    }
}
