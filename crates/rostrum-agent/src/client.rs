//! LLM provider client normalizing five vendor APIs to one text call.
//!
//! Each provider has its own request/response shape; [`LlmClient`]
//! normalizes all of them to the single [`TextGenerator`] contract:
//! prompt in, generated text out. The xAI and Groq endpoints speak the
//! OpenAI chat-completions dialect and share one code path.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{AgentConfig, ApiKeys, Provider};
use crate::error::{AgentError, Result};

/// Google Gemini generateContent endpoint (model interpolated).
const GOOGLE_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// OpenAI chat completions endpoint.
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Anthropic messages endpoint.
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Anthropic API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// xAI chat completions endpoint (OpenAI-compatible).
const XAI_API_URL: &str = "https://api.x.ai/v1/chat/completions";

/// Groq chat completions endpoint (OpenAI-compatible).
const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// One text-generation request, provider-agnostic.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// The user prompt.
    pub prompt: String,
    /// Optional system prompt.
    pub system_prompt: Option<String>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Token budget for the response.
    pub max_tokens: u32,
}

/// The LLM seam: anything that can turn a prompt into text.
///
/// Implemented by [`LlmClient`] for real vendors and by stubs in
/// orchestrator tests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for the request, or fails with a provider error.
    async fn generate(&self, request: &GenerateRequest) -> Result<String>;
}

/// HTTP client for a single configured provider/model pair.
#[derive(Clone, Debug)]
pub struct LlmClient {
    http: reqwest::Client,
    config: AgentConfig,
    api_key: String,
}

impl LlmClient {
    /// Creates a client, validating that the provider's credential is
    /// present. Missing credentials fail here, before any session work.
    pub fn new(config: AgentConfig, keys: &ApiKeys) -> Result<Self> {
        let api_key = keys.for_provider(config.provider).ok_or_else(|| {
            AgentError::Configuration(format!(
                "API key '{}' is required for provider '{}'",
                config.provider.key_name(),
                config.provider
            ))
        })?;

        debug!(provider = %config.provider, model = %config.model, "LLM client initialized");

        Ok(Self {
            http: reqwest::Client::new(),
            config,
            api_key: api_key.to_string(),
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    fn provider_error(&self, status: u16, body: String) -> AgentError {
        AgentError::Provider {
            provider: self.config.provider.to_string(),
            status,
            body,
        }
    }

    fn shape_error(&self) -> AgentError {
        AgentError::ResponseShape {
            provider: self.config.provider.to_string(),
        }
    }

    async fn generate_google(&self, request: &GenerateRequest) -> Result<String> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GOOGLE_API_BASE, self.config.model, self.api_key
        );

        // Gemini has no dedicated system slot in this shape; the system
        // prompt is prepended to the user prompt.
        let full_prompt = match &request.system_prompt {
            Some(system) => format!("{}\n\n{}", system, request.prompt),
            None => request.prompt.clone(),
        };

        let payload = GoogleRequest {
            contents: vec![GoogleContent {
                parts: vec![GooglePart { text: full_prompt }],
            }],
            generation_config: GoogleGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
                top_p: 0.8,
                top_k: 10,
            },
        };

        let response = self.http.post(&url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.provider_error(status.as_u16(), body));
        }

        let body: GoogleResponse = response.json().await?;
        body.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| self.shape_error())
    }

    async fn generate_anthropic(&self, request: &GenerateRequest) -> Result<String> {
        let payload = AnthropicRequest {
            model: self.config.model.clone(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            system: request.system_prompt.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
        };

        let response = self
            .http
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.provider_error(status.as_u16(), body));
        }

        let body: AnthropicResponse = response.json().await?;
        body.content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| self.shape_error())
    }

    /// Shared path for the OpenAI-compatible vendors (OpenAI, xAI, Groq).
    async fn chat_completions(&self, url: &str, request: &GenerateRequest) -> Result<String> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system_prompt {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.prompt.clone(),
        });

        let payload = ChatRequest {
            model: self.config.model.clone(),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        trace!(url, model = %payload.model, "sending chat completion request");

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.provider_error(status.as_u16(), body));
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| self.shape_error())
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<String> {
        debug!(
            provider = %self.config.provider,
            model = %self.config.model,
            prompt_len = request.prompt.len(),
            "generating text"
        );

        match self.config.provider {
            Provider::Google => self.generate_google(request).await,
            Provider::OpenAI => self.chat_completions(OPENAI_API_URL, request).await,
            Provider::Anthropic => self.generate_anthropic(request).await,
            Provider::Xai => self.chat_completions(XAI_API_URL, request).await,
            Provider::Groq => self.chat_completions(GROQ_API_URL, request).await,
        }
    }
}

// Google Gemini wire types.

#[derive(Serialize)]
struct GoogleRequest {
    contents: Vec<GoogleContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GoogleGenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct GoogleContent {
    parts: Vec<GooglePart>,
}

#[derive(Serialize, Deserialize)]
struct GooglePart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GoogleGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    top_p: f32,
    top_k: u32,
}

#[derive(Deserialize)]
struct GoogleResponse {
    #[serde(default)]
    candidates: Vec<GoogleCandidate>,
}

#[derive(Deserialize)]
struct GoogleCandidate {
    content: GoogleContent,
}

// OpenAI-compatible chat completion wire types (OpenAI, xAI, Groq).

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

// Anthropic messages wire types.

#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicContentBlock>,
}

#[derive(Deserialize)]
struct AnthropicContentBlock {
    text: String,
}
