//! Portal configuration.
//!
//! Configuration comes from three layers, later ones winning:
//!
//! 1. Built-in defaults ([`PortalConfig::default`])
//! 2. A YAML file (`--config`)
//! 3. Environment variables: `CAMPUS_API_KEY` (or `API_KEY`) and `CAMPUS_DATA`
//!
//! Command-line flags are applied on top by the binary.
//!
//! ```yaml
//! data: ./catalog.yaml
//! assistant:
//!   api_key: sk-...
//!   temperature: 0.3
//! forum:
//!   author: Alice Martin
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::forum::{DEFAULT_AUTHOR, DEFAULT_COMMENTER};

/// Placeholder key shipped in sample configurations. Treated as no key.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_GEMINI_API_KEY";

pub const ENV_API_KEY: &str = "CAMPUS_API_KEY";
pub const ENV_API_KEY_FALLBACK: &str = "API_KEY";
pub const ENV_DATA: &str = "CAMPUS_DATA";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Settings of the study assistant's text generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model: String,
    pub system_instruction: String,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub thinking_budget: u32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        AssistantConfig {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            system_instruction: "You are a helpful study assistant for university students. \
                                 Provide concise and accurate information, and be polite."
                .to_string(),
            temperature: 0.7,
            top_p: 0.95,
            top_k: 64,
            max_output_tokens: 500,
            thinking_budget: 100,
        }
    }
}

impl AssistantConfig {
    /// The API key, unless missing, blank or the placeholder.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }
}

/// Names signed on forum activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForumConfig {
    pub author: String,
    pub commenter: String,
}

impl Default for ForumConfig {
    fn default() -> Self {
        ForumConfig {
            author: DEFAULT_AUTHOR.to_string(),
            commenter: DEFAULT_COMMENTER.to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Catalog file to use instead of the bundled data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PathBuf>,
    pub assistant: AssistantConfig,
    pub forum: ForumConfig,
}

impl PortalConfig {
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // an empty file is an empty mapping
        if content.trim().is_empty() {
            return Ok(PortalConfig::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Loads configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "config loaded");
        Self::from_yaml(&content)
    }

    /// Applies environment overrides read through `lookup`.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(ENV_API_KEY).or_else(|| non_empty(ENV_API_KEY_FALLBACK)) {
            debug!("assistant API key taken from the environment");
            self.assistant.api_key = Some(key);
        }
        if let Some(data) = non_empty(ENV_DATA) {
            debug!(data = %data, "catalog path taken from the environment");
            self.data = Some(PathBuf::from(data));
        }
        self
    }

    /// Defaults or `path`, then the process environment.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => PortalConfig::default(),
        };
        Ok(config.with_env(|name| std::env::var(name).ok()))
    }
}
