//! Agent model configuration and credential handling.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// LLM vendor an agent generates text through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Google Gemini generateContent API.
    #[default]
    Google,
    /// OpenAI chat completions API.
    OpenAI,
    /// Anthropic messages API.
    Anthropic,
    /// xAI Grok chat completions API.
    Xai,
    /// Groq OpenAI-compatible chat completions API.
    Groq,
}

impl Provider {
    /// The credential entry this provider requires.
    pub fn key_name(self) -> &'static str {
        match self {
            Self::Google => "google_api_key",
            Self::OpenAI => "openai_api_key",
            Self::Anthropic => "anthropic_api_key",
            Self::Xai => "xai_api_key",
            Self::Groq => "groq_api_key",
        }
    }

    /// The environment variable the credential is read from.
    pub fn env_var(self) -> &'static str {
        match self {
            Self::Google => "GOOGLE_API_KEY",
            Self::OpenAI => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Xai => "XAI_API_KEY",
            Self::Groq => "GROQ_API_KEY",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Google => write!(f, "google"),
            Self::OpenAI => write!(f, "openai"),
            Self::Anthropic => write!(f, "anthropic"),
            Self::Xai => write!(f, "xai"),
            Self::Groq => write!(f, "groq"),
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = AgentError;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.to_lowercase().as_str() {
            "google" | "gemini" => Ok(Self::Google),
            "openai" => Ok(Self::OpenAI),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            "xai" | "grok" => Ok(Self::Xai),
            "groq" => Ok(Self::Groq),
            other => Err(AgentError::Configuration(format!(
                "unsupported provider: {}",
                other
            ))),
        }
    }
}

/// Model configuration for one agent role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Model identifier (e.g., "gemini-1.5-flash", "gpt-4o").
    #[serde(default = "default_model")]
    pub model: String,

    /// LLM provider to use.
    #[serde(default)]
    pub provider: Provider,

    /// Temperature for generation (0.0 to 2.0).
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Token budget per generated argument.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            provider: Provider::default(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl AgentConfig {
    /// Creates a configuration for the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Sets the provider.
    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = provider;
        self
    }

    /// Sets the temperature, clamped to 0.0..=2.0.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    /// Sets the token budget.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Credential store for LLM and search vendors.
///
/// Keyed by the lowercase credential names the settings file uses
/// (`google_api_key`, `tavily_api_key`, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeys(HashMap<String, String>);

/// Environment variables scanned by [`ApiKeys::from_env`].
const KEY_ENV_VARS: &[&str] = &[
    "GOOGLE_API_KEY",
    "OPENAI_API_KEY",
    "ANTHROPIC_API_KEY",
    "XAI_API_KEY",
    "GROQ_API_KEY",
    "TAVILY_API_KEY",
    "SERPAPI_KEY",
];

impl ApiKeys {
    /// Creates an empty credential store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects known credentials from the process environment.
    pub fn from_env() -> Self {
        let mut keys = HashMap::new();
        for var in KEY_ENV_VARS {
            if let Ok(value) = std::env::var(var) {
                if !value.is_empty() {
                    keys.insert(var.to_lowercase(), value);
                }
            }
        }
        Self(keys)
    }

    /// Looks up a credential by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|s| s.as_str())
    }

    /// The credential for an LLM provider, if present.
    pub fn for_provider(&self, provider: Provider) -> Option<&str> {
        self.get(provider.key_name())
    }

    /// Inserts or replaces a credential.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Merges another store into this one; `other` wins on conflicts.
    pub fn merge(&mut self, other: ApiKeys) {
        self.0.extend(other.0);
    }

    /// Returns true when no credentials are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
